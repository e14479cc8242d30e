// src/views/mod.rs

pub mod carrinho;
pub mod catalogo;
pub mod pedido;

use crate::notificacao::Notificacao;

pub const LARGURA_ECRA: usize = 78;

pub fn cabecalho(titulo: &str) -> String {
    let linha = "=".repeat(LARGURA_ECRA);
    format!("{linha}\n  {titulo}\n{linha}\n")
}

pub fn separador() -> String {
    format!("{}\n", "-".repeat(LARGURA_ECRA))
}

/// Região de notificações mostrada acima de cada ecrã; vazia quando não há
/// mensagens recentes.
pub fn regiao_notificacoes(notificacoes: &[Notificacao]) -> String {
    if notificacoes.is_empty() {
        return String::new();
    }
    let mut saida = String::new();
    for n in notificacoes {
        saida.push_str(&format!(
            "{} [{}] {}\n",
            n.severidade.marcador(),
            n.criada_em.format("%H:%M:%S"),
            n.mensagem
        ));
    }
    saida
}

/// Abrevia descrições longas para caberem na coluna da tabela.
pub fn abrevia(texto: &str, largura: usize) -> String {
    if texto.chars().count() <= largura {
        return texto.to_string();
    }
    let cortado: String = texto.chars().take(largura.saturating_sub(1)).collect();
    format!("{cortado}…")
}
