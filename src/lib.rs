// src/lib.rs

//! # ComprAl: composição de pedidos sobre contratos
//!
//! Cliente de terminal do sistema de gestão de contratos: navegação do
//! catálogo de itens, carrinho de seleção e geração de AOCS (uma por
//! contrato) com os respetivos pedidos de item.

pub mod api;
pub mod app;
pub mod carrinho;
pub mod catalogo;
pub mod catalogo_handlers;
pub mod consulta_handlers;
pub mod notificacao;
pub mod pedido;
pub mod pedido_handlers;
pub mod views;
