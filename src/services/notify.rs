// src/services/notify.rs
//
// Avisos de WhatsApp via CallMeBot. Disparo em segundo plano, melhor
// esforço: falha de envio nunca falha a operação que o originou.

const CALLMEBOT_URL: &str = "https://api.callmebot.com/whatsapp.php";

#[derive(Clone)]
pub struct WhatsAppNotifier {
    client: reqwest::Client,
    api_key: Option<String>,
    admin_phone: Option<String>,
}

impl WhatsAppNotifier {
    pub fn new(api_key: Option<String>, admin_phone: Option<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key,
            admin_phone,
        }
    }

    pub fn notificar_admin(&self, mensagem: &str) {
        match &self.admin_phone {
            Some(telefone) => self.notificar(telefone, mensagem),
            None => tracing::debug!("ADMIN_PHONE não configurado, aviso descartado."),
        }
    }

    pub fn notificar(&self, telefone: &str, mensagem: &str) {
        let Some(api_key) = self.api_key.clone() else {
            tracing::debug!("CALLMEBOT_API_KEY não configurada, aviso descartado.");
            return;
        };

        let client = self.client.clone();
        let telefone = telefone.to_string();
        let mensagem = mensagem.to_string();

        tokio::spawn(async move {
            let resultado = client
                .get(CALLMEBOT_URL)
                .query(&[
                    ("phone", telefone.as_str()),
                    ("text", mensagem.as_str()),
                    ("apikey", api_key.as_str()),
                ])
                .send()
                .await;

            match resultado {
                Ok(resposta) if !resposta.status().is_success() => {
                    tracing::warn!(
                        status = %resposta.status(),
                        "Gateway de WhatsApp respondeu com erro."
                    );
                }
                Err(e) => {
                    tracing::warn!("Falha ao enviar aviso de WhatsApp: {}", e);
                }
                _ => {}
            }
        });
    }
}
