// src/catalogo_handlers.rs

//! # Handlers de Navegação do Catálogo
//!
//! Comandos do terminal que mexem no estado do catálogo e do carrinho. A
//! camada de domínio devolve resultados puros; é aqui que eles viram
//! notificações e re-renderização.

use crate::app::{confirmar, App};
use crate::carrinho::{formata_numero_ptbr, ResultadoQuantidade};
use crate::catalogo::COLUNAS_ORDENACAO;
use tokio::io::{AsyncBufRead, Lines};

/// Recarrega a página corrente preservando busca e ordenação. A falha já
/// fica registada no estado como linha de erro; aqui só vira notificação.
pub async fn recarregar(app: &mut App) {
    let pagina = app.catalogo.pagina_atual;
    if let Err(e) = app.catalogo.carregar_pagina(&app.api, pagina).await {
        app.notificacoes.erro(e.to_string());
    }
}

pub async fn ir_para_pagina(app: &mut App, pagina: u32) {
    if pagina < 1 || pagina > app.catalogo.total_paginas {
        app.notificacoes.aviso(format!(
            "Página inválida: o catálogo tem {} página(s).",
            app.catalogo.total_paginas
        ));
        return;
    }
    if let Err(e) = app.catalogo.carregar_pagina(&app.api, pagina).await {
        app.notificacoes.erro(e.to_string());
    }
}

pub async fn primeira_pagina(app: &mut App) {
    if app.catalogo.na_primeira_pagina() {
        return; // controlo desativado na primeira página
    }
    ir_para_pagina(app, 1).await;
}

pub async fn pagina_anterior(app: &mut App) {
    if app.catalogo.na_primeira_pagina() {
        return;
    }
    let anterior = app.catalogo.pagina_atual - 1;
    ir_para_pagina(app, anterior).await;
}

pub async fn proxima_pagina(app: &mut App) {
    if app.catalogo.na_ultima_pagina() {
        return; // controlo desativado na última página
    }
    let proxima = app.catalogo.pagina_atual + 1;
    ir_para_pagina(app, proxima).await;
}

pub async fn ultima_pagina(app: &mut App) {
    if app.catalogo.na_ultima_pagina() {
        return;
    }
    let ultima = app.catalogo.total_paginas;
    ir_para_pagina(app, ultima).await;
}

pub async fn buscar(app: &mut App, termo: &str) {
    app.catalogo.definir_busca(termo);
    if let Err(e) = app.catalogo.carregar_pagina(&app.api, 1).await {
        app.notificacoes.erro(e.to_string());
    }
}

pub async fn ordenar(app: &mut App, coluna: &str) {
    if !COLUNAS_ORDENACAO.contains(&coluna) {
        app.notificacoes.aviso(format!(
            "Coluna desconhecida. Colunas: {}.",
            COLUNAS_ORDENACAO.join(", ")
        ));
        return;
    }
    app.catalogo.alternar_ordenacao(coluna);
    if let Err(e) = app.catalogo.carregar_pagina(&app.api, 1).await {
        app.notificacoes.erro(e.to_string());
    }
}

/// `qtd <id> <quantidade>`: atualiza o carrinho a partir de um item da
/// página visível e traduz o resultado em notificação.
pub fn definir_quantidade(app: &mut App, item_id: i64, entrada: &str) {
    let Some(item) = app.catalogo.item(item_id).cloned() else {
        app.notificacoes.aviso(format!(
            "Item {item_id} não está na página atual do catálogo."
        ));
        return;
    };

    match app.carrinho.definir_quantidade(&item, entrada) {
        ResultadoQuantidade::Atualizada => {}
        ResultadoQuantidade::Limitada { maximo } if maximo > 0.0 => {
            app.notificacoes.aviso(format!(
                "Saldo insuficiente para o item {}: o máximo é {}.",
                item.numero_item,
                formata_numero_ptbr(maximo)
            ));
        }
        ResultadoQuantidade::Limitada { .. } => {
            app.notificacoes.aviso(format!(
                "O item {} está sem saldo disponível.",
                item.numero_item
            ));
        }
        ResultadoQuantidade::Removida => {}
    }
}

/// Esvazia o carrinho após confirmação interativa. Não recarrega a página;
/// os marcadores somem porque a projeção volta a um carrinho vazio.
pub async fn limpar_carrinho<R>(app: &mut App, entrada: &mut Lines<R>)
where
    R: AsyncBufRead + Unpin,
{
    if app.carrinho.esta_vazio() {
        app.notificacoes.aviso("O carrinho já está vazio.");
        return;
    }
    if !confirmar(entrada, "Tem a certeza que deseja esvaziar o carrinho? (s/n) ").await {
        return;
    }
    app.carrinho.limpar();
    app.rascunho = None;
    app.notificacoes.sucesso("Carrinho esvaziado.");
}
