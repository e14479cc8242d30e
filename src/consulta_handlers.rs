// src/consulta_handlers.rs

//! # Handlers da Consulta de AOCS
//!
//! Vista de histórico para onde a finalização salta após o sucesso, com a
//! exclusão de uma AOCS (resposta 204 sem corpo) como única ação.

use crate::app::{confirmar, App};
use crate::views;
use tokio::io::{AsyncBufRead, Lines};

pub async fn listar(app: &mut App) {
    match app.api.listar_aocs().await {
        Ok(lista) => println!("{}", views::pedido::pagina_consulta(&lista)),
        Err(e) => app
            .notificacoes
            .erro(format!("Falha ao consultar AOCS: {e}")),
    }
}

pub async fn excluir<R>(app: &mut App, entrada: &mut Lines<R>, id: i64)
where
    R: AsyncBufRead + Unpin,
{
    if !confirmar(
        entrada,
        &format!("Tem a certeza que deseja excluir a AOCS {id}? (s/n) "),
    )
    .await
    {
        return;
    }
    match app.api.excluir_aocs(id).await {
        Ok(()) => app.notificacoes.sucesso(format!("AOCS {id} excluída.")),
        Err(e) => app.notificacoes.erro(format!("Falha ao excluir: {e}")),
    }
}
