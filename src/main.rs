// src/main.rs

use compral::api::{ApiClient, Categoria};
use compral::app::{entrada_do_terminal, perguntar, App, Entrada};
use compral::catalogo::EstadoCatalogo;
use compral::{
    catalogo_handlers, consulta_handlers, notificacao, pedido_handlers, views,
};

#[tokio::main]
async fn main() {
    println!("🚀 A iniciar o ComprAl (terminal de novo pedido)...");
    dotenvy::dotenv().ok();

    // Garante a pasta de dados antes de qualquer escrita.
    notificacao::ensure_data_structure().await;

    let api = ApiClient::new();
    println!("🌐 Servidor: {}", api.base_url());

    let mut entrada = entrada_do_terminal();

    let categorias = match api.listar_categorias().await {
        Ok(lista) if !lista.is_empty() => lista,
        Ok(_) => {
            eprintln!("🔥 O servidor não tem categorias registadas.");
            return;
        }
        Err(e) => {
            eprintln!("🔥 Falha crítica ao contactar o servidor: {e}");
            return;
        }
    };

    let Some(categoria) = escolher_categoria(&mut entrada, &categorias).await else {
        println!("👋 Sessão terminada.");
        return;
    };
    let mut app = App::novo(api, EstadoCatalogo::novo(&categoria));

    // Notificação deixada pela sessão anterior (entrega única).
    if let Some(pendente) = notificacao::tomar_pendente().await {
        app.notificacoes.acrescentar(pendente);
    }

    catalogo_handlers::recarregar(&mut app).await;
    render(&app);
    imprime_ajuda();

    loop {
        print!("compral> ");
        let _ = std::io::Write::flush(&mut std::io::stdout());
        let linha = match entrada.next_line().await {
            Ok(Some(l)) => l.trim().to_string(),
            _ => break, // fim da entrada encerra a sessão
        };
        if linha.is_empty() {
            continue;
        }
        let mut partes = linha.split_whitespace();
        let comando = partes.next().unwrap_or_default().to_lowercase();
        let resto: Vec<&str> = partes.collect();

        match comando.as_str() {
            "ajuda" | "?" => {
                imprime_ajuda();
                continue;
            }
            "catalogo" => {}
            "pagina" => match resto.first().and_then(|p| p.parse::<u32>().ok()) {
                Some(pagina) => catalogo_handlers::ir_para_pagina(&mut app, pagina).await,
                None => app.notificacoes.aviso("Uso: pagina <número>"),
            },
            "proxima" | "p" => catalogo_handlers::proxima_pagina(&mut app).await,
            "anterior" | "a" => catalogo_handlers::pagina_anterior(&mut app).await,
            "primeira" => catalogo_handlers::primeira_pagina(&mut app).await,
            "ultima" => catalogo_handlers::ultima_pagina(&mut app).await,
            "buscar" => catalogo_handlers::buscar(&mut app, &resto.join(" ")).await,
            "ordenar" => match resto.first() {
                Some(coluna) => catalogo_handlers::ordenar(&mut app, coluna).await,
                None => app.notificacoes.aviso("Uso: ordenar <coluna>"),
            },
            "qtd" => match resto.as_slice() {
                [id, valor] => match id.parse::<i64>() {
                    Ok(item_id) => catalogo_handlers::definir_quantidade(&mut app, item_id, valor),
                    Err(_) => app.notificacoes.aviso("Uso: qtd <id do item> <quantidade>"),
                },
                [id] => match id.parse::<i64>() {
                    // Sem valor, a quantidade é limpa (remove a linha).
                    Ok(item_id) => catalogo_handlers::definir_quantidade(&mut app, item_id, ""),
                    Err(_) => app.notificacoes.aviso("Uso: qtd <id do item> <quantidade>"),
                },
                _ => app.notificacoes.aviso("Uso: qtd <id do item> <quantidade>"),
            },
            "carrinho" => {
                println!("{}", views::carrinho::resumo(&app.carrinho));
                continue;
            }
            "limpar" => catalogo_handlers::limpar_carrinho(&mut app, &mut entrada).await,
            "finalizar" => {
                pedido_handlers::finalizar(&mut app, &mut entrada).await;
            }
            "aocs" => {
                consulta_handlers::listar(&mut app).await;
            }
            "excluir" => match resto.first().and_then(|p| p.parse::<i64>().ok()) {
                Some(id) => consulta_handlers::excluir(&mut app, &mut entrada, id).await,
                None => app.notificacoes.aviso("Uso: excluir <id da AOCS>"),
            },
            "sair" => break,
            outro => {
                app.notificacoes
                    .aviso(format!("Comando desconhecido: \"{outro}\". Escreva `ajuda`."));
            }
        }

        render(&app);
    }

    println!("👋 Sessão terminada.");
}

/// Ecrã principal: notificações, tabela do catálogo e resumo do carrinho.
fn render(app: &App) {
    let mut ecra = String::new();
    ecra.push_str(&views::regiao_notificacoes(app.notificacoes.recentes()));
    ecra.push_str(&views::catalogo::pagina_catalogo(&app.catalogo, &app.carrinho));
    ecra.push_str(&views::carrinho::resumo(&app.carrinho));
    println!("{ecra}");
}

/// None quando a entrada termina antes de uma escolha válida.
async fn escolher_categoria(
    entrada: &mut Entrada,
    categorias: &[Categoria],
) -> Option<Categoria> {
    println!("📚 Categorias disponíveis:");
    for c in categorias {
        println!("   {:>4}  {}", c.id, c.nome);
    }
    loop {
        let resposta = perguntar(entrada, "Escolha a categoria (id): ").await?;
        if let Ok(id) = resposta.parse::<i64>() {
            if let Some(categoria) = categorias.iter().find(|c| c.id == id) {
                return Some(categoria.clone());
            }
        }
        println!("⚠️  Categoria inválida.");
    }
}

fn imprime_ajuda() {
    println!(
        r#"Comandos:
  pagina <n> | proxima | anterior | primeira | ultima   navegação do catálogo
  buscar [termo]                                        busca (sem termo, limpa)
  ordenar <coluna>                                      alterna a ordenação
  qtd <id> <quantidade>                                 define a quantidade (ex.: qtd 101 1.000,50)
  carrinho | limpar                                     resumo / esvaziar o carrinho
  finalizar                                             gera as AOCS do carrinho
  aocs | excluir <id>                                   consulta / exclui AOCS
  ajuda | sair
"#
    );
}
