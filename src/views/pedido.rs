// src/views/pedido.rs

//! Renderização do diálogo de finalização e do relatório de submissão.

use crate::api::AocsResumo;
use crate::carrinho::{formata_moeda, Carrinho};
use crate::pedido::ResultadoGrupo;
use crate::views::{cabecalho, separador};

/// Abertura do diálogo: resumo por contrato antes da recolha dos dados.
/// Cada contrato listado terá o seu próprio número de AOCS.
pub fn abertura_dialogo(carrinho: &Carrinho) -> String {
    let contratos = carrinho.contratos();
    let mut saida = cabecalho("Finalizar Pedido: Geração de AOCS");
    saida.push_str(&format!(
        "O carrinho tem {} item(ns) em {} contrato(s); será criada uma AOCS por contrato.\n",
        carrinho.linhas().len(),
        contratos.len()
    ));
    for (contrato_id, contrato_numero) in &contratos {
        let itens = carrinho
            .linhas()
            .iter()
            .filter(|l| l.contrato_id == *contrato_id)
            .count();
        let subtotal: f64 = carrinho
            .linhas()
            .iter()
            .filter(|l| l.contrato_id == *contrato_id)
            .map(|l| l.subtotal)
            .sum();
        saida.push_str(&format!(
            "   Contrato {contrato_numero}: {itens} item(ns), {}\n",
            formata_moeda(subtotal)
        ));
    }
    saida.push_str(&format!(
        "   Total Geral: {}\n",
        formata_moeda(carrinho.total())
    ));
    saida.push_str(&separador());
    saida.push_str("Preencha os dados da requisição (escreva `!cancelar` para sair):\n");
    saida
}

/// Relatório final da submissão, um resultado por contrato. Grupos que já
/// tinham sucedido quando outro falhou continuam criados no servidor.
pub fn relatorio_submissao(resultados: &[ResultadoGrupo]) -> String {
    let mut saida = separador();
    for resultado in resultados {
        match &resultado.resultado {
            Ok(aocs) => saida.push_str(&format!(
                "✅ Contrato {}: AOCS nº {} criada (id {}).\n",
                resultado.contrato_numero, aocs.numero_aocs, aocs.id
            )),
            Err(falha) => saida.push_str(&format!("🔥 {falha}\n")),
        }
    }
    saida
}

pub fn pagina_consulta(aocs: &[AocsResumo]) -> String {
    let mut saida = cabecalho("Consulta de AOCS");
    if aocs.is_empty() {
        saida.push_str("  (nenhuma AOCS registada)\n");
        return saida;
    }
    saida.push_str(&format!(
        "  {:>6} {:<18} {:<28} {:<20}\n",
        "ID", "Número", "Unidade Requisitante", "Agente Responsável"
    ));
    saida.push_str(&separador());
    for a in aocs {
        saida.push_str(&format!(
            "  {:>6} {:<18} {:<28} {:<20}\n",
            a.id, a.numero_aocs, a.unidade_requisitante_nome, a.agente_responsavel_nome
        ));
    }
    saida
}
