// ==========================================
// Gerador de Relatórios - Especificação de filtros
// ==========================================
// Responsabilidade: tipo explícito para os filtros da requisição
// Substitui payloads dinâmicos de chaves arbitrárias: a validação
// acontece uma vez na borda, via serde
// ==========================================

use serde::{Deserialize, Serialize};

/// Conjunto de listas de inclusão opcionais, combinadas por E lógico.
///
/// Lista vazia = sem restrição naquele campo. Fornecedor e filial
/// comparam por igualdade exata de texto; ano/mes/dia por igualdade
/// inteira sobre as partes de data derivadas.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct FilterSpec {
    pub fornecedor: Vec<String>,
    pub filial: Vec<String>,
    pub ano: Vec<i64>,
    pub mes: Vec<i64>,
    pub dia: Vec<i64>,
}

impl FilterSpec {
    /// Nenhuma restrição em nenhum campo
    pub fn is_unconstrained(&self) -> bool {
        self.fornecedor.is_empty()
            && self.filial.is_empty()
            && self.ano.is_empty()
            && self.mes.is_empty()
            && self.dia.is_empty()
    }
}
