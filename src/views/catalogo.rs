// src/views/catalogo.rs

//! Renderização da tabela do catálogo e da barra de paginação. A coluna
//! "Qtd." espelha o carrinho: itens selecionados aparecem marcados com a
//! quantidade escolhida, independentemente da página ter sido recarregada.

use crate::api::ItemContrato;
use crate::carrinho::{formata_moeda, formata_numero_ptbr, Carrinho};
use crate::catalogo::{janela_paginacao, Direcao, EstadoCatalogo};
use crate::views::{abrevia, cabecalho, separador};

pub fn pagina_catalogo(estado: &EstadoCatalogo, carrinho: &Carrinho) -> String {
    let mut saida = cabecalho(&format!(
        "Novo Pedido: Categoria {}",
        estado.categoria_nome
    ));

    if !estado.busca.is_empty() {
        saida.push_str(&format!("Busca ativa: \"{}\"\n", estado.busca));
    }

    saida.push_str(&linha_titulos(estado));
    saida.push_str(&separador());

    if let Some(erro) = &estado.erro_carga {
        // Linha de erro no lugar dos itens, como na tabela original.
        saida.push_str(&format!("  🔥 Falha ao carregar itens: {erro}\n"));
    } else if estado.itens.is_empty() {
        saida.push_str("  (nenhum item encontrado)\n");
    } else {
        for item in &estado.itens {
            saida.push_str(&linha_item(carrinho, item));
        }
    }

    saida.push_str(&separador());
    saida.push_str(&barra_paginacao(estado));
    saida
}

fn linha_titulos(estado: &EstadoCatalogo) -> String {
    let marca = |coluna: &str| -> &'static str {
        if estado.coluna_ordenacao == coluna {
            match estado.direcao {
                Direcao::Asc => "▲",
                Direcao::Desc => "▼",
            }
        } else {
            " "
        }
    };
    format!(
        "  {:>6} {:>5}{} {:<32}{} {:<12} {:>10}{} {:>12}{} {:>8}\n",
        "ID",
        "Item",
        marca("numero_item"),
        "Descrição",
        marca("descricao"),
        "Contrato",
        "Saldo",
        marca("saldo_disponivel"),
        "Vl. Unit.",
        marca("valor_unitario"),
        "Qtd."
    )
}

fn linha_item(carrinho: &Carrinho, item: &ItemContrato) -> String {
    // Marcador e quantidade pré-preenchida vêm do carrinho, nunca da página.
    let (marcador, quantidade) = match carrinho.linha(item.id) {
        Some(linha) => ("●", formata_numero_ptbr(linha.quantidade)),
        None => (" ", String::new()),
    };
    format!(
        "{} {:>6} {:>5}  {:<33} {:<12} {:>11} {:>13} {:>8}\n",
        marcador,
        item.id,
        item.numero_item,
        abrevia(&item.item_catalogo.descricao, 33),
        item.contrato_numero,
        formata_numero_ptbr(item.saldo_disponivel),
        formata_moeda(item.valor_unitario),
        quantidade
    )
}

/// Janela de até 5 páginas com a atual entre parênteses retos; os controlos
/// de extremo aparecem apagados ("··") quando não há para onde ir.
pub fn barra_paginacao(estado: &EstadoCatalogo) -> String {
    let mut partes: Vec<String> = Vec::new();

    if estado.na_primeira_pagina() {
        partes.push("··".to_string());
        partes.push("··".to_string());
    } else {
        partes.push("«".to_string());
        partes.push("‹".to_string());
    }

    for pagina in janela_paginacao(estado.total_paginas, estado.pagina_atual) {
        if pagina == estado.pagina_atual {
            partes.push(format!("[{pagina}]"));
        } else {
            partes.push(pagina.to_string());
        }
    }

    if estado.na_ultima_pagina() {
        partes.push("··".to_string());
        partes.push("··".to_string());
    } else {
        partes.push("›".to_string());
        partes.push("»".to_string());
    }

    format!(
        "Páginas: {}   ({} de {})\n",
        partes.join(" "),
        estado.pagina_atual,
        estado.total_paginas
    )
}
