// src/views/carrinho.rs

//! Resumo do carrinho: lista de linhas e total geral, mais a dica sobre a
//! disponibilidade do comando de finalização.

use crate::carrinho::{formata_moeda, formata_numero_ptbr, Carrinho};
use crate::views::{abrevia, separador};

pub fn resumo(carrinho: &Carrinho) -> String {
    if carrinho.esta_vazio() {
        return "🛒 Carrinho vazio. Use `qtd <id> <quantidade>` para adicionar itens.\n"
            .to_string();
    }

    let mut saida = format!("🛒 Carrinho ({} itens):\n", carrinho.linhas().len());
    for linha in carrinho.linhas() {
        saida.push_str(&format!(
            "   {:>6}  {:<36} {:>10} x {:>12} = {:>14}   [{}]\n",
            linha.item_id,
            abrevia(&linha.nome, 36),
            formata_numero_ptbr(linha.quantidade),
            formata_moeda(linha.valor_unitario),
            formata_moeda(linha.subtotal),
            linha.contrato_numero
        ));
    }
    saida.push_str(&separador());
    saida.push_str(&format!(
        "   Total Geral: {}   (use `finalizar` para gerar as AOCS)\n",
        formata_moeda(carrinho.total())
    ));
    saida
}
