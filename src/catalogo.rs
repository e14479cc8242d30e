// src/catalogo.rs

//! # Navegador do Catálogo
//!
//! Estado de navegação (página, busca e ordenação) da listagem de itens da
//! categoria ativa. O servidor é a autoridade sobre paginação: cada
//! carregamento adota o `total_paginas`/`pagina_atual` que ele devolver.

use crate::api::{ApiClient, Categoria, ErroApi, ItemContrato};

/// Colunas de ordenação aceites pelo servidor.
pub const COLUNAS_ORDENACAO: &[&str] = &[
    "numero_item",
    "descricao",
    "contrato",
    "saldo_disponivel",
    "valor_unitario",
];

/// Largura máxima da janela de links de página.
const LARGURA_JANELA: u32 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direcao {
    Asc,
    Desc,
}

impl Direcao {
    pub fn como_parametro(self) -> &'static str {
        match self {
            Direcao::Asc => "asc",
            Direcao::Desc => "desc",
        }
    }

    fn inversa(self) -> Self {
        match self {
            Direcao::Asc => Direcao::Desc,
            Direcao::Desc => Direcao::Asc,
        }
    }
}

#[derive(Debug, Clone)]
pub struct EstadoCatalogo {
    pub categoria_id: i64,
    pub categoria_nome: String,
    pub pagina_atual: u32,
    pub total_paginas: u32,
    pub busca: String,
    pub coluna_ordenacao: String,
    pub direcao: Direcao,
    /// Linhas visíveis da página corrente (projeção; o carrinho manda).
    pub itens: Vec<ItemContrato>,
    /// Preenchido quando o último carregamento falhou; a tabela mostra a
    /// linha de erro em vez de itens.
    pub erro_carga: Option<String>,
}

impl EstadoCatalogo {
    pub fn novo(categoria: &Categoria) -> Self {
        Self {
            categoria_id: categoria.id,
            categoria_nome: categoria.nome.clone(),
            pagina_atual: 1,
            total_paginas: 1,
            busca: String::new(),
            coluna_ordenacao: "descricao".to_string(),
            direcao: Direcao::Asc,
            itens: Vec::new(),
            erro_carga: None,
        }
    }

    /// Clicar na coluna ativa inverte a direção; noutra coluna, seleciona-a
    /// ascendente. Qualquer mudança de ordenação volta à página 1.
    pub fn alternar_ordenacao(&mut self, coluna: &str) {
        if self.coluna_ordenacao == coluna {
            self.direcao = self.direcao.inversa();
        } else {
            self.coluna_ordenacao = coluna.to_string();
            self.direcao = Direcao::Asc;
        }
        self.pagina_atual = 1;
    }

    /// Nova busca sempre recomeça na primeira página.
    pub fn definir_busca(&mut self, termo: &str) {
        self.busca = termo.trim().to_string();
        self.pagina_atual = 1;
    }

    pub async fn carregar_pagina(&mut self, api: &ApiClient, pagina: u32) -> Result<(), ErroApi> {
        match api
            .listar_itens(
                self.categoria_id,
                pagina,
                &self.busca,
                &self.coluna_ordenacao,
                self.direcao.como_parametro(),
            )
            .await
        {
            Ok(resposta) => {
                self.itens = resposta.itens;
                self.total_paginas = resposta.total_paginas.max(1);
                self.pagina_atual = resposta.pagina_atual;
                self.erro_carga = None;
                Ok(())
            }
            Err(e) => {
                self.itens.clear();
                self.erro_carga = Some(e.to_string());
                Err(e)
            }
        }
    }

    pub fn na_primeira_pagina(&self) -> bool {
        self.pagina_atual <= 1
    }

    pub fn na_ultima_pagina(&self) -> bool {
        self.pagina_atual >= self.total_paginas
    }

    pub fn item(&self, item_id: i64) -> Option<&ItemContrato> {
        self.itens.iter().find(|i| i.id == item_id)
    }
}

/// Janela deslizante de no máximo 5 páginas centrada na atual, recortada
/// para o intervalo válido.
pub fn janela_paginacao(total_paginas: u32, pagina_atual: u32) -> Vec<u32> {
    let total = total_paginas.max(1);
    let atual = pagina_atual.clamp(1, total);

    let mut inicio = atual.saturating_sub(LARGURA_JANELA / 2).max(1);
    let fim = (inicio + LARGURA_JANELA - 1).min(total);
    inicio = fim.saturating_sub(LARGURA_JANELA - 1).max(1);

    (inicio..=fim).collect()
}
