// src/pedido_handlers.rs

//! # Handler de Finalização do Pedido
//!
//! Conduz o diálogo de finalização: recolhe os metadados partilhados da
//! AOCS e um número por contrato, valida, dispara a submissão e traduz o
//! desfecho em notificações. Numa falha parcial o rascunho é preservado
//! para o utilizador corrigir e tentar de novo. O fim da entrada, em
//! qualquer pergunta, cancela o diálogo sem efeito de rede.

use crate::app::{perguntar, App, RascunhoDialogo};
use crate::notificacao::{self, Notificacao, Severidade};
use crate::pedido::{self, DadosAoc, EstadoDialogo, Submissao, MENSAGEM_AOCS_FALTANTE};
use crate::views;
use chrono::Local;
use std::collections::HashMap;
use std::time::Duration;
use tokio::io::{AsyncBufRead, Lines};

/// Pausa entre o sucesso e o "salto" para a consulta de AOCS.
const ATRASO_POS_SUCESSO: Duration = Duration::from_millis(1500);

pub async fn finalizar<R>(app: &mut App, entrada: &mut Lines<R>)
where
    R: AsyncBufRead + Unpin,
{
    if app.dialogo == EstadoDialogo::Submetendo {
        // Guarda de reentrância do controlo de submissão.
        app.notificacoes.aviso("Já existe uma submissão em curso.");
        return;
    }
    if app.carrinho.esta_vazio() {
        app.notificacoes
            .aviso("O carrinho está vazio; adicione itens antes de finalizar.");
        return;
    }

    app.dialogo = app.dialogo.abrir(app.carrinho.esta_vazio());
    println!("{}", views::pedido::abertura_dialogo(&app.carrinho));

    let rascunho_anterior = app.rascunho.take().unwrap_or_default();

    let Some(dados) = recolher_dados(entrada, &rascunho_anterior.dados).await else {
        app.dialogo = app.dialogo.cancelar();
        app.rascunho = Some(rascunho_anterior);
        app.notificacoes.aviso("Finalização cancelada.");
        return;
    };

    let Some(numeros) =
        recolher_numeros_aocs(app, entrada, &rascunho_anterior.numeros_aocs).await
    else {
        app.dialogo = app.dialogo.cancelar();
        app.rascunho = Some(RascunhoDialogo {
            dados,
            numeros_aocs: rascunho_anterior.numeros_aocs,
        });
        app.notificacoes.aviso("Finalização cancelada.");
        return;
    };

    // Validação antes de qualquer chamada de rede: se algum número faltar,
    // a submissão inteira é abortada.
    app.dialogo = app.dialogo.submeter();
    let desfecho = pedido::submeter(&app.api, &app.carrinho, &dados, &numeros).await;

    match desfecho {
        Submissao::Invalida {
            contratos_sem_numero,
        } => {
            app.dialogo = app.dialogo.concluir(false);
            app.rascunho = Some(RascunhoDialogo {
                dados,
                numeros_aocs: numeros,
            });
            let numeros_contratos: Vec<String> = app
                .carrinho
                .contratos()
                .iter()
                .filter(|(id, _)| contratos_sem_numero.contains(id))
                .map(|(_, numero)| numero.clone())
                .collect();
            app.notificacoes.erro(format!(
                "{MENSAGEM_AOCS_FALTANTE} (em falta: {})",
                numeros_contratos.join(", ")
            ));
        }
        Submissao::Concluida(resultados) => {
            println!("{}", views::pedido::relatorio_submissao(&resultados));
            match pedido::primeira_falha(&resultados) {
                None => {
                    app.dialogo = app.dialogo.concluir(true);
                    app.rascunho = None;
                    app.carrinho.limpar();
                    concluir_com_sucesso(app, resultados.len()).await;
                }
                Some(mensagem) => {
                    // Grupos que já sucederam não são desfeitos; o diálogo
                    // volta à edição com o rascunho preservado.
                    app.dialogo = app.dialogo.concluir(false);
                    app.rascunho = Some(RascunhoDialogo {
                        dados,
                        numeros_aocs: numeros,
                    });
                    app.notificacoes.erro(mensagem);
                }
            }
        }
    }
}

/// Recolhe os campos partilhados da AOCS, reaproveitando o rascunho como
/// valor por omissão. Devolve None quando o utilizador cancela (ou a
/// entrada termina).
async fn recolher_dados<R>(entrada: &mut Lines<R>, anterior: &DadosAoc) -> Option<DadosAoc>
where
    R: AsyncBufRead + Unpin,
{
    Some(DadosAoc {
        unidade_requisitante_nome: campo_obrigatorio(
            entrada,
            "Unidade requisitante",
            &anterior.unidade_requisitante_nome,
        )
        .await?,
        justificativa: campo_obrigatorio(entrada, "Justificativa", &anterior.justificativa)
            .await?,
        dotacao_info_orcamentaria: campo_obrigatorio(
            entrada,
            "Dotação orçamentária",
            &anterior.dotacao_info_orcamentaria,
        )
        .await?,
        local_entrega_descricao: campo_obrigatorio(
            entrada,
            "Local de entrega",
            &anterior.local_entrega_descricao,
        )
        .await?,
        agente_responsavel_nome: campo_obrigatorio(
            entrada,
            "Agente responsável",
            &anterior.agente_responsavel_nome,
        )
        .await?,
    })
}

/// Um input por contrato distinto no carrinho, gerado dinamicamente na
/// abertura do diálogo. Em branco é permitido aqui; a validação da
/// submissão é que trava. None apenas quando a entrada termina.
async fn recolher_numeros_aocs<R>(
    app: &App,
    entrada: &mut Lines<R>,
    anteriores: &HashMap<i64, String>,
) -> Option<HashMap<i64, String>>
where
    R: AsyncBufRead + Unpin,
{
    let mut numeros = HashMap::new();
    for (contrato_id, contrato_numero) in app.carrinho.contratos() {
        let anterior = anteriores.get(&contrato_id).cloned().unwrap_or_default();
        let prompt = if anterior.is_empty() {
            format!("Número da AOCS para o contrato {contrato_numero}: ")
        } else {
            format!("Número da AOCS para o contrato {contrato_numero} [{anterior}]: ")
        };
        let resposta = perguntar(entrada, &prompt).await?;
        let valor = if resposta.is_empty() { anterior } else { resposta };
        numeros.insert(contrato_id, valor);
    }
    Some(numeros)
}

/// Campo com `required`: insiste até haver valor, aceitando o rascunho como
/// omissão; `!cancelar` ou o fim da entrada fecham o diálogo sem efeito de
/// rede.
async fn campo_obrigatorio<R>(
    entrada: &mut Lines<R>,
    rotulo: &str,
    anterior: &str,
) -> Option<String>
where
    R: AsyncBufRead + Unpin,
{
    loop {
        let prompt = if anterior.is_empty() {
            format!("{rotulo}: ")
        } else {
            format!("{rotulo} [{anterior}]: ")
        };
        let resposta = perguntar(entrada, &prompt).await?;
        if resposta == "!cancelar" {
            return None;
        }
        if !resposta.is_empty() {
            return Some(resposta);
        }
        if !anterior.is_empty() {
            return Some(anterior.to_string());
        }
        println!("⚠️  Campo obrigatório.");
    }
}

/// Notificação de sucesso entregue "após a navegação": fica no slot
/// pendente, é consumida ao saltar para a consulta e sobreviveria a um
/// reinício se o salto não acontecesse.
async fn concluir_com_sucesso(app: &mut App, total_aocs: usize) {
    let pendente = Notificacao {
        mensagem: format!("{total_aocs} AOCS criada(s) com sucesso!"),
        severidade: Severidade::Sucesso,
        criada_em: Local::now(),
    };
    if let Err(e) = notificacao::guardar_pendente(&pendente).await {
        eprintln!("🔥 Falha ao guardar a notificação pendente: {e}");
    }

    println!("✅ Pedido submetido. A abrir a consulta de AOCS...");
    tokio::time::sleep(ATRASO_POS_SUCESSO).await;

    if let Some(notificacao) = notificacao::tomar_pendente().await {
        app.notificacoes.acrescentar(notificacao);
    }
    crate::consulta_handlers::listar(app).await;
}
