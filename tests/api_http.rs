// tests/api_http.rs

// Cenários de rede do cliente da API e da submissão de pedidos, contra um
// servidor HTTP de teste.

use compral::api::{ApiClient, ErroApi, ItemCatalogo, ItemContrato};
use compral::carrinho::Carrinho;
use compral::catalogo::{Direcao, EstadoCatalogo};
use compral::pedido::{self, DadosAoc, EstadoDialogo, Submissao};
use httpmock::prelude::*;
use serde_json::json;
use std::collections::HashMap;

fn item(id: i64, contrato_id: i64, saldo: f64, valor: f64) -> ItemContrato {
    ItemContrato {
        id,
        numero_item: id,
        item_catalogo: ItemCatalogo {
            descricao: format!("Item {id}"),
        },
        contrato_id,
        contrato_numero: format!("{contrato_id:04}/2025"),
        saldo_disponivel: saldo,
        valor_unitario: valor,
    }
}

fn dados_aoc() -> DadosAoc {
    DadosAoc {
        unidade_requisitante_nome: "Divisão de Obras".to_string(),
        justificativa: "Reposição de estoque".to_string(),
        dotacao_info_orcamentaria: "33.90.30".to_string(),
        local_entrega_descricao: "Almoxarifado central".to_string(),
        agente_responsavel_nome: "Maria Silva".to_string(),
    }
}

#[tokio::test]
async fn carregar_pagina_envia_uma_unica_chamada_com_os_quatro_parametros() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/api/categorias/7/itens")
                .query_param("page", "2")
                .query_param("busca", "cimento")
                .query_param("sort_by", "descricao")
                .query_param("order", "desc");
            then.status(200).json_body(json!({
                "itens": [{
                    "id": 101,
                    "numero_item": 1,
                    "item_catalogo": {"descricao": "Cimento CP-II 50kg"},
                    "contrato_id": 55,
                    "contrato_numero": "0055/2025",
                    "saldo_disponivel": 120.0,
                    "valor_unitario": 42.9
                }],
                "total_paginas": 4,
                "pagina_atual": 2
            }));
        })
        .await;

    let api = ApiClient::new_with_base_url(server.base_url());
    let mut estado = EstadoCatalogo::novo(&compral::api::Categoria {
        id: 7,
        nome: "Material de Construção".to_string(),
    });
    estado.definir_busca("cimento");
    estado.coluna_ordenacao = "descricao".to_string();
    estado.direcao = Direcao::Desc;

    estado
        .carregar_pagina(&api, 2)
        .await
        .expect("carregamento deve suceder");

    mock.assert_async().await;
    assert_eq!(estado.pagina_atual, 2);
    assert_eq!(estado.total_paginas, 4);
    assert_eq!(estado.itens.len(), 1);
    assert!(estado.erro_carga.is_none());
}

#[tokio::test]
async fn falha_de_carga_guarda_a_mensagem_do_envelope() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/api/categorias/7/itens");
            then.status(500).json_body(json!({"erro": "Erro Interno"}));
        })
        .await;

    let api = ApiClient::new_with_base_url(server.base_url());
    let mut estado = EstadoCatalogo::novo(&compral::api::Categoria {
        id: 7,
        nome: "Material de Construção".to_string(),
    });

    let erro = estado
        .carregar_pagina(&api, 1)
        .await
        .expect_err("deve falhar");
    assert_eq!(erro.to_string(), "Erro Interno");
    assert!(estado.itens.is_empty());
    assert_eq!(estado.erro_carga.as_deref(), Some("Erro Interno"));
}

#[tokio::test]
async fn envelope_de_erro_reconhece_detail_erro_e_fallback() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/api/aocs").json_body_partial(
                json!({"numero_aocs": "DETALHE"}).to_string(),
            );
            then.status(422)
                .json_body(json!({"detail": "Número de AOCS já utilizado."}));
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/api/aocs")
                .json_body_partial(json!({"numero_aocs": "ERRO"}).to_string());
            then.status(500).json_body(json!({"erro": "Erro Interno"}));
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/api/aocs")
                .json_body_partial(json!({"numero_aocs": "TEXTO"}).to_string());
            then.status(502).body("bad gateway");
        })
        .await;

    let api = ApiClient::new_with_base_url(server.base_url());
    let base = dados_aoc();
    let nova = |numero: &str| compral::api::NovaAocs {
        unidade_requisitante_nome: base.unidade_requisitante_nome.clone(),
        justificativa: base.justificativa.clone(),
        dotacao_info_orcamentaria: base.dotacao_info_orcamentaria.clone(),
        local_entrega_descricao: base.local_entrega_descricao.clone(),
        agente_responsavel_nome: base.agente_responsavel_nome.clone(),
        numero_aocs: numero.to_string(),
    };

    let erro = api.criar_aocs(&nova("DETALHE")).await.expect_err("422");
    assert_eq!(erro.to_string(), "Número de AOCS já utilizado.");

    let erro = api.criar_aocs(&nova("ERRO")).await.expect_err("500");
    assert_eq!(erro.to_string(), "Erro Interno");

    let erro = api.criar_aocs(&nova("TEXTO")).await.expect_err("502");
    match erro {
        ErroApi::Servidor { status, mensagem } => {
            assert_eq!(status, 502);
            assert_eq!(mensagem, "Erro no servidor (HTTP 502).");
        }
        outro => panic!("esperava ErroApi::Servidor, veio {outro:?}"),
    }
}

#[tokio::test]
async fn numero_de_aocs_em_branco_aborta_sem_nenhuma_chamada() {
    let server = MockServer::start_async().await;
    let aocs_mock = server
        .mock_async(|when, then| {
            when.method(POST).path("/api/aocs");
            then.status(201).json_body(json!({"id": 1}));
        })
        .await;

    let mut carrinho = Carrinho::default();
    carrinho.definir_quantidade(&item(101, 55, 10.0, 50.0), "2");
    carrinho.definir_quantidade(&item(102, 56, 10.0, 100.0), "1");

    let mut numeros = HashMap::new();
    numeros.insert(56, "AOCS-56/2025".to_string());
    // Contrato 55 ficou sem número.

    let api = ApiClient::new_with_base_url(server.base_url());
    let desfecho = pedido::submeter(&api, &carrinho, &dados_aoc(), &numeros).await;

    match desfecho {
        Submissao::Invalida {
            contratos_sem_numero,
        } => assert_eq!(contratos_sem_numero, vec![55]),
        Submissao::Concluida(_) => panic!("a validação devia ter travado a submissão"),
    }
    assert_eq!(aocs_mock.hits_async().await, 0);
}

#[tokio::test]
async fn submissao_completa_cria_uma_aocs_por_contrato_e_um_pedido_por_linha() {
    let server = MockServer::start_async().await;
    let aocs_55 = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/api/aocs")
                .json_body_partial(json!({"numero_aocs": "A55"}).to_string());
            then.status(201)
                .json_body(json!({"id": 1, "numero_aocs": "A55"}));
        })
        .await;
    let aocs_56 = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/api/aocs")
                .json_body_partial(json!({"numero_aocs": "A56"}).to_string());
            then.status(201)
                .json_body(json!({"id": 2, "numero_aocs": "A56"}));
        })
        .await;
    let pedidos_1 = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/api/pedidos")
                .query_param("id_aocs", "1");
            then.status(201).json_body(json!({"id": 10}));
        })
        .await;
    let pedidos_2 = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/api/pedidos")
                .query_param("id_aocs", "2")
                .json_body_partial(json!({"quantidade_pedida": "1.00"}).to_string());
            then.status(201).json_body(json!({"id": 11}));
        })
        .await;

    let mut carrinho = Carrinho::default();
    carrinho.definir_quantidade(&item(101, 55, 10.0, 50.0), "2");
    carrinho.definir_quantidade(&item(102, 56, 10.0, 100.0), "1");
    carrinho.definir_quantidade(&item(103, 55, 10.0, 10.0), "3");

    let mut numeros = HashMap::new();
    numeros.insert(55, "A55".to_string());
    numeros.insert(56, "A56".to_string());

    let api = ApiClient::new_with_base_url(server.base_url());
    let desfecho = pedido::submeter(&api, &carrinho, &dados_aoc(), &numeros).await;

    let resultados = match desfecho {
        Submissao::Concluida(r) => r,
        Submissao::Invalida { .. } => panic!("números preenchidos não deviam invalidar"),
    };
    assert_eq!(resultados.len(), 2);
    assert!(resultados.iter().all(|r| r.resultado.is_ok()));
    assert!(pedido::primeira_falha(&resultados).is_none());

    assert_eq!(aocs_55.hits_async().await, 1);
    assert_eq!(aocs_56.hits_async().await, 1);
    // Duas linhas no contrato 55, uma no 56.
    assert_eq!(pedidos_1.hits_async().await, 2);
    assert_eq!(pedidos_2.hits_async().await, 1);
}

#[tokio::test]
async fn falha_parcial_mantem_os_sucessos_e_reporta_o_contrato_que_falhou() {
    let server = MockServer::start_async().await;
    let aocs_55 = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/api/aocs")
                .json_body_partial(json!({"numero_aocs": "A55"}).to_string());
            then.status(201)
                .json_body(json!({"id": 1, "numero_aocs": "A55"}));
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/api/aocs")
                .json_body_partial(json!({"numero_aocs": "A56"}).to_string());
            then.status(500).json_body(json!({"erro": "Erro Interno"}));
        })
        .await;
    let pedidos = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/api/pedidos")
                .query_param("id_aocs", "1");
            then.status(201).json_body(json!({"id": 10}));
        })
        .await;

    let mut carrinho = Carrinho::default();
    carrinho.definir_quantidade(&item(101, 55, 10.0, 50.0), "2");
    carrinho.definir_quantidade(&item(102, 56, 10.0, 100.0), "1");

    let mut numeros = HashMap::new();
    numeros.insert(55, "A55".to_string());
    numeros.insert(56, "A56".to_string());

    let api = ApiClient::new_with_base_url(server.base_url());
    let desfecho = pedido::submeter(&api, &carrinho, &dados_aoc(), &numeros).await;

    let resultados = match desfecho {
        Submissao::Concluida(r) => r,
        Submissao::Invalida { .. } => panic!("números preenchidos não deviam invalidar"),
    };

    // O contrato 55 continua criado; nada é desfeito.
    assert_eq!(aocs_55.hits_async().await, 1);
    assert_eq!(pedidos.hits_async().await, 1);
    assert!(resultados
        .iter()
        .find(|r| r.contrato_id == 55)
        .is_some_and(|r| r.resultado.is_ok()));

    let mensagem = pedido::primeira_falha(&resultados).expect("há uma falha");
    assert!(mensagem.contains("Erro Interno"));
    assert!(mensagem.contains("0056/2025"));

    // A falha devolve o diálogo à edição para nova tentativa.
    assert_eq!(
        EstadoDialogo::Submetendo.concluir(false),
        EstadoDialogo::Editando
    );
}

#[tokio::test]
async fn exclusao_devolve_204_sem_corpo_e_e_tratada_como_sucesso() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(DELETE).path("/api/aocs/9");
            then.status(204);
        })
        .await;

    let api = ApiClient::new_with_base_url(server.base_url());
    api.excluir_aocs(9).await.expect("204 é sucesso");
    mock.assert_async().await;
}

#[tokio::test]
async fn corpo_2xx_com_forma_inesperada_vira_erro_de_formato() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/api/categorias");
            then.status(200).json_body(json!({"inesperado": true}));
        })
        .await;

    let api = ApiClient::new_with_base_url(server.base_url());
    let erro = api.listar_categorias().await.expect_err("forma errada");
    assert!(matches!(erro, ErroApi::Formato(_)));
}
