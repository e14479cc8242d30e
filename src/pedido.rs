// src/pedido.rs

//! # Submissão do Pedido (AOCS por contrato)
//!
//! A finalização transforma o carrinho em grupos por contrato e cria, para
//! cada grupo, uma AOCS seguida dos seus pedidos de item. Os grupos correm
//! em paralelo entre si; dentro de um grupo os pedidos só seguem depois da
//! AOCS desse contrato ser criada. Uma falha num grupo NÃO desfaz os grupos
//! que já tiveram sucesso; o relatório identifica o contrato/item que falhou.

use crate::api::{AocsCriada, ApiClient, ErroApi, NovaAocs, NovoPedido};
use crate::carrinho::{formata_quantidade, Carrinho};
use futures_util::future::join_all;
use std::collections::HashMap;

pub const MENSAGEM_AOCS_FALTANTE: &str =
    "Preencha o número da AOCS para todos os contratos listados.";

// --- ESTRUTURAS DA SUBMISSÃO ---

/// Metadados partilhados por todas as AOCS de uma mesma finalização.
#[derive(Debug, Clone, Default)]
pub struct DadosAoc {
    pub unidade_requisitante_nome: String,
    pub justificativa: String,
    pub dotacao_info_orcamentaria: String,
    pub local_entrega_descricao: String,
    pub agente_responsavel_nome: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LinhaPendente {
    pub item_id: i64,
    pub nome: String,
    pub quantidade: f64,
}

/// Grupo efémero por contrato, construído apenas durante a submissão.
#[derive(Debug, Clone, PartialEq)]
pub struct GrupoPendente {
    pub contrato_id: i64,
    pub contrato_numero: String,
    pub linhas: Vec<LinhaPendente>,
}

#[derive(Debug, thiserror::Error)]
pub enum FalhaGrupo {
    #[error("Contrato {contrato}: {fonte}")]
    Aocs { contrato: String, fonte: ErroApi },
    #[error("Item \"{item}\" (contrato {contrato}): {fonte}")]
    Pedido {
        contrato: String,
        item: String,
        fonte: ErroApi,
    },
}

#[derive(Debug)]
pub struct ResultadoGrupo {
    pub contrato_id: i64,
    pub contrato_numero: String,
    pub resultado: Result<AocsCriada, FalhaGrupo>,
}

/// Desfecho da finalização: ou a validação travou tudo antes de qualquer
/// chamada de rede, ou todos os grupos correram até ao fim.
#[derive(Debug)]
pub enum Submissao {
    Invalida { contratos_sem_numero: Vec<i64> },
    Concluida(Vec<ResultadoGrupo>),
}

// --- ESTADO DO DIÁLOGO DE FINALIZAÇÃO ---

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EstadoDialogo {
    Fechado,
    Editando,
    Submetendo,
}

impl EstadoDialogo {
    /// Só abre com o carrinho não vazio.
    pub fn abrir(self, carrinho_vazio: bool) -> Self {
        match self {
            EstadoDialogo::Fechado if !carrinho_vazio => EstadoDialogo::Editando,
            outro => outro,
        }
    }

    pub fn submeter(self) -> Self {
        match self {
            EstadoDialogo::Editando => EstadoDialogo::Submetendo,
            outro => outro,
        }
    }

    /// Sucesso fecha o diálogo; falha devolve-o à edição para nova tentativa.
    pub fn concluir(self, sucesso: bool) -> Self {
        match self {
            EstadoDialogo::Submetendo if sucesso => EstadoDialogo::Fechado,
            EstadoDialogo::Submetendo => EstadoDialogo::Editando,
            outro => outro,
        }
    }

    /// Cancelar só tem efeito em edição; uma submissão em curso não é
    /// cancelável.
    pub fn cancelar(self) -> Self {
        match self {
            EstadoDialogo::Editando => EstadoDialogo::Fechado,
            outro => outro,
        }
    }
}

// --- ALGORITMO DE SUBMISSÃO ---

/// Agrupa as linhas do carrinho por contrato, preservando a ordem de
/// inserção dos contratos e das linhas.
pub fn agrupar_por_contrato(carrinho: &Carrinho) -> Vec<GrupoPendente> {
    let mut grupos: Vec<GrupoPendente> = Vec::new();
    for linha in carrinho.linhas() {
        let pendente = LinhaPendente {
            item_id: linha.item_id,
            nome: linha.nome.clone(),
            quantidade: linha.quantidade,
        };
        match grupos.iter_mut().find(|g| g.contrato_id == linha.contrato_id) {
            Some(grupo) => grupo.linhas.push(pendente),
            None => grupos.push(GrupoPendente {
                contrato_id: linha.contrato_id,
                contrato_numero: linha.contrato_numero.clone(),
                linhas: vec![pendente],
            }),
        }
    }
    grupos
}

/// Contratos cujo número de AOCS ficou em branco. A verificação percorre
/// todos os grupos antes de devolver, para o diálogo poder marcar cada
/// input em falta.
pub fn contratos_sem_numero(
    grupos: &[GrupoPendente],
    numeros: &HashMap<i64, String>,
) -> Vec<i64> {
    grupos
        .iter()
        .filter(|g| {
            numeros
                .get(&g.contrato_id)
                .map(|n| n.trim().is_empty())
                .unwrap_or(true)
        })
        .map(|g| g.contrato_id)
        .collect()
}

/// Executa a finalização completa: validação primeiro (zero chamadas de
/// rede se algum número faltar) e depois os grupos em paralelo.
pub async fn submeter(
    api: &ApiClient,
    carrinho: &Carrinho,
    dados: &DadosAoc,
    numeros: &HashMap<i64, String>,
) -> Submissao {
    let grupos = agrupar_por_contrato(carrinho);

    let faltantes = contratos_sem_numero(&grupos, numeros);
    if !faltantes.is_empty() {
        return Submissao::Invalida {
            contratos_sem_numero: faltantes,
        };
    }

    let tarefas = grupos.into_iter().map(|grupo| {
        let numero = numeros
            .get(&grupo.contrato_id)
            .cloned()
            .unwrap_or_default()
            .trim()
            .to_string();
        submeter_grupo(api, grupo, dados, numero)
    });

    Submissao::Concluida(join_all(tarefas).await)
}

/// Cadeia de um contrato: cria a AOCS e, só depois, cada pedido de item em
/// sequência. A primeira falha interrompe a cadeia deste grupo apenas.
async fn submeter_grupo(
    api: &ApiClient,
    grupo: GrupoPendente,
    dados: &DadosAoc,
    numero_aocs: String,
) -> ResultadoGrupo {
    let nova = NovaAocs {
        unidade_requisitante_nome: dados.unidade_requisitante_nome.clone(),
        justificativa: dados.justificativa.clone(),
        dotacao_info_orcamentaria: dados.dotacao_info_orcamentaria.clone(),
        local_entrega_descricao: dados.local_entrega_descricao.clone(),
        agente_responsavel_nome: dados.agente_responsavel_nome.clone(),
        numero_aocs,
    };

    let criada = match api.criar_aocs(&nova).await {
        Ok(criada) => criada,
        Err(fonte) => {
            return ResultadoGrupo {
                contrato_id: grupo.contrato_id,
                contrato_numero: grupo.contrato_numero.clone(),
                resultado: Err(FalhaGrupo::Aocs {
                    contrato: grupo.contrato_numero,
                    fonte,
                }),
            }
        }
    };

    for linha in &grupo.linhas {
        let novo = NovoPedido {
            item_contrato_id: linha.item_id,
            quantidade_pedida: formata_quantidade(linha.quantidade),
        };
        if let Err(fonte) = api.criar_pedido(criada.id, &novo).await {
            return ResultadoGrupo {
                contrato_id: grupo.contrato_id,
                contrato_numero: grupo.contrato_numero.clone(),
                resultado: Err(FalhaGrupo::Pedido {
                    contrato: grupo.contrato_numero,
                    item: linha.nome.clone(),
                    fonte,
                }),
            };
        }
    }

    ResultadoGrupo {
        contrato_id: grupo.contrato_id,
        contrato_numero: grupo.contrato_numero,
        resultado: Ok(criada),
    }
}

/// Mensagem da primeira falha, para a notificação de erro da finalização.
pub fn primeira_falha(resultados: &[ResultadoGrupo]) -> Option<String> {
    resultados
        .iter()
        .find_map(|r| r.resultado.as_ref().err().map(|f| f.to_string()))
}
