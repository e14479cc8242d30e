// src/carrinho.rs

//! # Carrinho de Composição de Pedido
//!
//! Estado em memória dos itens selecionados para o novo pedido: uma linha
//! por item de contrato, na ordem em que as quantidades foram definidas.
//! O carrinho é a fonte de verdade; a página do catálogo visível é apenas
//! uma projeção dele.

use crate::api::ItemContrato;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LinhaCarrinho {
    pub item_id: i64,
    pub nome: String,
    pub quantidade: f64,
    /// Preço unitário congelado no momento da seleção.
    pub valor_unitario: f64,
    pub subtotal: f64,
    pub contrato_id: i64,
    pub contrato_numero: String,
}

/// Resultado de uma alteração de quantidade, para a camada de comandos
/// decidir que notificação mostrar.
#[derive(Debug, Clone, PartialEq)]
pub enum ResultadoQuantidade {
    /// Linha criada ou atualizada com o valor pedido.
    Atualizada,
    /// O valor pedido excedia o saldo; a linha ficou com o máximo possível
    /// (ou foi removida, quando o saldo é zero).
    Limitada { maximo: f64 },
    /// Entrada inválida ou não positiva; a linha deixou de existir.
    Removida,
}

#[derive(Debug, Clone, Default)]
pub struct Carrinho {
    linhas: Vec<LinhaCarrinho>,
}

impl Carrinho {
    /// Interpreta a entrada do utilizador e cria/atualiza/remove a linha do
    /// item. Valores acima do saldo são limitados ao saldo disponível.
    pub fn definir_quantidade(&mut self, item: &ItemContrato, entrada: &str) -> ResultadoQuantidade {
        let quantidade = match parse_decimal_ptbr(entrada) {
            Some(q) if q > 0.0 => q,
            _ => {
                self.remover(item.id);
                return ResultadoQuantidade::Removida;
            }
        };

        if item.saldo_disponivel <= 0.0 {
            self.remover(item.id);
            return ResultadoQuantidade::Limitada { maximo: 0.0 };
        }

        let limitada = quantidade > item.saldo_disponivel;
        let quantidade = if limitada {
            item.saldo_disponivel
        } else {
            quantidade
        };

        self.upsert(LinhaCarrinho {
            item_id: item.id,
            nome: item.item_catalogo.descricao.clone(),
            quantidade,
            valor_unitario: item.valor_unitario,
            subtotal: quantidade * item.valor_unitario,
            contrato_id: item.contrato_id,
            contrato_numero: item.contrato_numero.clone(),
        });

        if limitada {
            ResultadoQuantidade::Limitada {
                maximo: item.saldo_disponivel,
            }
        } else {
            ResultadoQuantidade::Atualizada
        }
    }

    /// Uma linha por item: atualizar mantém a posição original.
    fn upsert(&mut self, linha: LinhaCarrinho) {
        match self.linhas.iter_mut().find(|l| l.item_id == linha.item_id) {
            Some(existente) => *existente = linha,
            None => self.linhas.push(linha),
        }
    }

    pub fn remover(&mut self, item_id: i64) {
        self.linhas.retain(|l| l.item_id != item_id);
    }

    pub fn limpar(&mut self) {
        self.linhas.clear();
    }

    pub fn linha(&self, item_id: i64) -> Option<&LinhaCarrinho> {
        self.linhas.iter().find(|l| l.item_id == item_id)
    }

    pub fn linhas(&self) -> &[LinhaCarrinho] {
        &self.linhas
    }

    pub fn esta_vazio(&self) -> bool {
        self.linhas.is_empty()
    }

    /// Total geral, sempre recalculado a partir das linhas.
    pub fn total(&self) -> f64 {
        self.linhas.iter().map(|l| l.subtotal).sum()
    }

    /// Pares (id, número) dos contratos presentes, na ordem de inserção das
    /// primeiras linhas de cada contrato. Um input de número de AOCS é
    /// criado por cada par no diálogo de finalização.
    pub fn contratos(&self) -> Vec<(i64, String)> {
        let mut contratos: Vec<(i64, String)> = Vec::new();
        for linha in &self.linhas {
            if !contratos.iter().any(|(id, _)| *id == linha.contrato_id) {
                contratos.push((linha.contrato_id, linha.contrato_numero.clone()));
            }
        }
        contratos
    }
}

// --- NÚMEROS EM FORMATO pt-BR ---

/// Interpreta um decimal com vírgula decimal e ponto de milhar
/// ("1.000,50" → 1000.5). Devolve None para entradas não numéricas.
pub fn parse_decimal_ptbr(texto: &str) -> Option<f64> {
    let limpo = texto.trim();
    if limpo.is_empty() {
        return None;
    }
    let normalizado = limpo.replace('.', "").replace(',', ".");
    match normalizado.parse::<f64>() {
        Ok(valor) if valor.is_finite() => Some(valor),
        _ => None,
    }
}

/// Formata um valor com duas casas, vírgula decimal e ponto de milhar.
pub fn formata_numero_ptbr(valor: f64) -> String {
    let texto = format!("{:.2}", valor.abs());
    let (inteiro, decimal) = texto.split_once('.').unwrap_or((texto.as_str(), "00"));
    let mut invertido = String::new();
    for (i, c) in inteiro.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            invertido.push('.');
        }
        invertido.push(c);
    }
    let agrupado: String = invertido.chars().rev().collect();
    let sinal = if valor < 0.0 { "-" } else { "" };
    format!("{sinal}{agrupado},{decimal}")
}

pub fn formata_moeda(valor: f64) -> String {
    format!("R$ {}", formata_numero_ptbr(valor))
}

/// Quantidade no formato do servidor: duas casas decimais com ponto.
pub fn formata_quantidade(quantidade: f64) -> String {
    format!("{:.2}", quantidade)
}
