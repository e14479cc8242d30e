// src/app.rs

//! Estado da aplicação e leitura de linhas do terminal. Todo o estado
//! mutável (carrinho, navegação do catálogo, diálogo) vive aqui e é passado
//! explicitamente aos handlers de comando; não há globais. A leitura é
//! genérica sobre o leitor, para os testes poderem guiar os diálogos com um
//! roteiro em memória.

use crate::api::ApiClient;
use crate::carrinho::Carrinho;
use crate::catalogo::EstadoCatalogo;
use crate::notificacao::Notificacoes;
use crate::pedido::{DadosAoc, EstadoDialogo};
use std::collections::HashMap;
use std::io::Write;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader, Lines, Stdin};

pub type Entrada = Lines<BufReader<Stdin>>;

pub fn entrada_do_terminal() -> Entrada {
    BufReader::new(tokio::io::stdin()).lines()
}

/// Rascunho do diálogo de finalização, preservado entre tentativas quando
/// uma submissão falha (o diálogo "fica aberto" para retentativa).
#[derive(Debug, Clone, Default)]
pub struct RascunhoDialogo {
    pub dados: DadosAoc,
    pub numeros_aocs: HashMap<i64, String>,
}

pub struct App {
    pub api: ApiClient,
    pub notificacoes: Notificacoes,
    pub carrinho: Carrinho,
    pub catalogo: EstadoCatalogo,
    pub dialogo: EstadoDialogo,
    pub rascunho: Option<RascunhoDialogo>,
}

impl App {
    pub fn novo(api: ApiClient, catalogo: EstadoCatalogo) -> Self {
        Self {
            api,
            notificacoes: Notificacoes::default(),
            carrinho: Carrinho::default(),
            catalogo,
            dialogo: EstadoDialogo::Fechado,
            rascunho: None,
        }
    }
}

/// Mostra o prompt e devolve a linha digitada, já aparada. Devolve None no
/// fim da entrada, para os ciclos de repetição poderem terminar.
pub async fn perguntar<R>(entrada: &mut Lines<R>, prompt: &str) -> Option<String>
where
    R: AsyncBufRead + Unpin,
{
    print!("{prompt}");
    let _ = std::io::stdout().flush();
    match entrada.next_line().await {
        Ok(Some(linha)) => Some(linha.trim().to_string()),
        _ => None,
    }
}

/// Pergunta de confirmação no estilo "s/n"; só "s"/"sim" confirma. O fim da
/// entrada conta como recusa.
pub async fn confirmar<R>(entrada: &mut Lines<R>, prompt: &str) -> bool
where
    R: AsyncBufRead + Unpin,
{
    match perguntar(entrada, prompt).await {
        Some(resposta) => matches!(resposta.to_lowercase().as_str(), "s" | "sim"),
        None => false,
    }
}
