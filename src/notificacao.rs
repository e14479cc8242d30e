// src/notificacao.rs

//! # Canal de Notificações
//!
//! Mensagens transitórias de estado mostradas no topo de cada ecrã, mais o
//! "slot" de entrega única que sobrevive a um reinício do programa (o
//! equivalente a mostrar um aviso logo após uma navegação completa).

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use tokio::fs;

pub const PASTA_DATA: &str = "data";
pub const NOTIFICACAO_PENDENTE_FILE: &str = "data/notificacao_pendente.json";

/// A região visível guarda apenas as mensagens mais recentes.
const MAX_VISIVEIS: usize = 3;

type AppResult<T> = Result<T, Box<dyn std::error::Error + Send + Sync>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Severidade {
    Sucesso,
    Aviso,
    Erro,
}

impl Severidade {
    pub fn marcador(self) -> &'static str {
        match self {
            Severidade::Sucesso => "✅",
            Severidade::Aviso => "⚠️ ",
            Severidade::Erro => "🔥",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Notificacao {
    pub mensagem: String,
    pub severidade: Severidade,
    pub criada_em: DateTime<Local>,
}

#[derive(Debug, Default)]
pub struct Notificacoes {
    recentes: Vec<Notificacao>,
}

impl Notificacoes {
    pub fn publicar(&mut self, mensagem: impl Into<String>, severidade: Severidade) {
        self.acrescentar(Notificacao {
            mensagem: mensagem.into(),
            severidade,
            criada_em: Local::now(),
        });
    }

    /// Reinsere uma notificação já construída (vinda do slot pendente).
    pub fn acrescentar(&mut self, notificacao: Notificacao) {
        self.recentes.push(notificacao);
        let excesso = self.recentes.len().saturating_sub(MAX_VISIVEIS);
        if excesso > 0 {
            self.recentes.drain(..excesso);
        }
    }

    pub fn sucesso(&mut self, mensagem: impl Into<String>) {
        self.publicar(mensagem, Severidade::Sucesso);
    }

    pub fn aviso(&mut self, mensagem: impl Into<String>) {
        self.publicar(mensagem, Severidade::Aviso);
    }

    pub fn erro(&mut self, mensagem: impl Into<String>) {
        self.publicar(mensagem, Severidade::Erro);
    }

    pub fn recentes(&self) -> &[Notificacao] {
        &self.recentes
    }
}

/// Garante que a pasta `data/` existe antes de qualquer escrita.
pub async fn ensure_data_structure() {
    if let Err(e) = fs::create_dir_all(PASTA_DATA).await {
        eprintln!("🔥 Falha crítica ao criar o diretório '{}': {}", PASTA_DATA, e);
    }
}

/// Guarda a notificação a mostrar no próximo arranque do programa.
pub async fn guardar_pendente(notificacao: &Notificacao) -> AppResult<()> {
    let json = serde_json::to_string_pretty(notificacao)?;
    fs::write(NOTIFICACAO_PENDENTE_FILE, json).await?;
    Ok(())
}

/// Lê e apaga o slot pendente; cada notificação é entregue uma única vez.
pub async fn tomar_pendente() -> Option<Notificacao> {
    let conteudo = fs::read_to_string(NOTIFICACAO_PENDENTE_FILE).await.ok()?;
    let notificacao = serde_json::from_str(&conteudo).ok()?;
    let _ = fs::remove_file(NOTIFICACAO_PENDENTE_FILE).await;
    Some(notificacao)
}
