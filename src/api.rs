// src/api.rs

//! # Cliente da API REST
//!
//! Este módulo concentra todo o acesso HTTP ao servidor de gestão de
//! contratos: tipos de pedido/resposta por endpoint e a extração da
//! mensagem de erro do envelope padrão do servidor.

use serde::{Deserialize, Serialize};

/// URL base usada quando a variável `COMPRAL_API_URL` não está definida.
pub const API_URL_PADRAO: &str = "http://127.0.0.1:8000";

// --- TIPO DE ERRO DA FRONTEIRA HTTP ---

#[derive(Debug, thiserror::Error)]
pub enum ErroApi {
    /// O servidor respondeu com estado não-2xx; a mensagem vem do
    /// envelope de erro (`detail` ou `erro`) ou de um texto genérico.
    #[error("{mensagem}")]
    Servidor { status: u16, mensagem: String },
    /// Falha de rede/transporte antes de haver resposta utilizável.
    #[error("Falha de comunicação com o servidor: {0}")]
    Rede(#[from] reqwest::Error),
    /// O corpo 2xx não tem a forma esperada pelo tipo do endpoint.
    #[error("Resposta do servidor em formato inesperado: {0}")]
    Formato(#[from] serde_json::Error),
}

// --- ESTRUTURAS DE DADOS (wire format do servidor) ---

#[derive(Debug, Clone, Deserialize)]
pub struct Categoria {
    pub id: i64,
    pub nome: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ItemCatalogo {
    pub descricao: String,
}

/// Item de contrato comprável, tal como o servidor o devolve. Imutável do
/// lado do cliente; cada mudança de página/busca/ordenação refaz a lista.
#[derive(Debug, Clone, Deserialize)]
pub struct ItemContrato {
    pub id: i64,
    pub numero_item: i64,
    pub item_catalogo: ItemCatalogo,
    pub contrato_id: i64,
    pub contrato_numero: String,
    pub saldo_disponivel: f64,
    pub valor_unitario: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PaginaItens {
    pub itens: Vec<ItemContrato>,
    pub total_paginas: u32,
    pub pagina_atual: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct NovaAocs {
    pub unidade_requisitante_nome: String,
    pub justificativa: String,
    pub dotacao_info_orcamentaria: String,
    pub local_entrega_descricao: String,
    pub agente_responsavel_nome: String,
    pub numero_aocs: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AocsCriada {
    pub id: i64,
    #[serde(default)]
    pub numero_aocs: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AocsResumo {
    pub id: i64,
    #[serde(default)]
    pub numero_aocs: String,
    #[serde(default)]
    pub unidade_requisitante_nome: String,
    #[serde(default)]
    pub agente_responsavel_nome: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct NovoPedido {
    pub item_contrato_id: i64,
    /// Quantidade formatada com duas casas decimais, como o servidor espera.
    pub quantidade_pedida: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Pedido {
    pub id: i64,
    #[serde(default)]
    pub item_contrato_id: i64,
    #[serde(default)]
    pub quantidade_pedida: String,
}

/// Envelope de erro do servidor. Dependendo da camada que falhou, a
/// mensagem legível vem em `detail` ou em `erro`.
#[derive(Debug, Deserialize)]
struct EnvelopeErro {
    #[serde(default)]
    detail: Option<String>,
    #[serde(default)]
    erro: Option<String>,
}

// --- CLIENTE ---

#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    pub fn new() -> Self {
        let base_url =
            std::env::var("COMPRAL_API_URL").unwrap_or_else(|_| API_URL_PADRAO.to_string());
        Self::new_with_base_url(base_url)
    }

    /// Constrói o cliente apontando para uma URL arbitrária (testes).
    pub fn new_with_base_url(base_url: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub async fn listar_categorias(&self) -> Result<Vec<Categoria>, ErroApi> {
        let resp = self
            .http
            .get(format!("{}/api/categorias", self.base_url))
            .send()
            .await?;
        decodifica(resp).await
    }

    /// Uma única chamada por carregamento de página: a categoria ativa mais
    /// os quatro parâmetros de navegação (página, busca, coluna, direção).
    pub async fn listar_itens(
        &self,
        categoria_id: i64,
        pagina: u32,
        busca: &str,
        sort_by: &str,
        order: &str,
    ) -> Result<PaginaItens, ErroApi> {
        let pagina_str = pagina.to_string();
        let resp = self
            .http
            .get(format!(
                "{}/api/categorias/{}/itens",
                self.base_url, categoria_id
            ))
            .query(&[
                ("page", pagina_str.as_str()),
                ("busca", busca),
                ("sort_by", sort_by),
                ("order", order),
            ])
            .send()
            .await?;
        decodifica(resp).await
    }

    pub async fn criar_aocs(&self, nova: &NovaAocs) -> Result<AocsCriada, ErroApi> {
        let resp = self
            .http
            .post(format!("{}/api/aocs", self.base_url))
            .json(nova)
            .send()
            .await?;
        decodifica(resp).await
    }

    pub async fn criar_pedido(&self, id_aocs: i64, novo: &NovoPedido) -> Result<Pedido, ErroApi> {
        let id_str = id_aocs.to_string();
        let resp = self
            .http
            .post(format!("{}/api/pedidos", self.base_url))
            .query(&[("id_aocs", id_str.as_str())])
            .json(novo)
            .send()
            .await?;
        decodifica(resp).await
    }

    pub async fn listar_aocs(&self) -> Result<Vec<AocsResumo>, ErroApi> {
        let resp = self
            .http
            .get(format!("{}/api/aocs", self.base_url))
            .send()
            .await?;
        decodifica(resp).await
    }

    /// Exclusão devolve 204 sem corpo; sucesso não tenta interpretar JSON.
    pub async fn excluir_aocs(&self, id: i64) -> Result<(), ErroApi> {
        let resp = self
            .http
            .delete(format!("{}/api/aocs/{}", self.base_url, id))
            .send()
            .await?;
        if !resp.status().is_success() {
            return Err(erro_de_resposta(resp).await);
        }
        Ok(())
    }
}

impl Default for ApiClient {
    fn default() -> Self {
        Self::new()
    }
}

// --- FUNÇÕES AUXILIARES ---

async fn decodifica<T: serde::de::DeserializeOwned>(resp: reqwest::Response) -> Result<T, ErroApi> {
    if !resp.status().is_success() {
        return Err(erro_de_resposta(resp).await);
    }
    let corpo = resp.text().await?;
    Ok(serde_json::from_str(&corpo)?)
}

/// Extrai a mensagem legível de uma resposta não-2xx. Corpos fora do
/// envelope conhecido caem no texto genérico com o código HTTP.
async fn erro_de_resposta(resp: reqwest::Response) -> ErroApi {
    let status = resp.status().as_u16();
    let generica = format!("Erro no servidor (HTTP {status}).");
    let mensagem = match resp.json::<EnvelopeErro>().await {
        Ok(envelope) => envelope.detail.or(envelope.erro).unwrap_or(generica),
        Err(_) => generica,
    };
    ErroApi::Servidor { status, mensagem }
}
