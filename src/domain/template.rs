// ==========================================
// Gerador de Relatórios - Templates de saída
// ==========================================
// Responsabilidade: layouts nomeados de exportação
// Registrados na inicialização, imutáveis depois disso
// ==========================================

use serde::{Deserialize, Serialize};

/// Nome reservado do template identidade (tabela filtrada sem reprojeção)
pub const TEMPLATE_IDENTITY: &str = "identidade";

/// Template padrão de faturamento
pub const TEMPLATE_FATURAMENTO: &str = "faturamento";

/// Origem de uma coluna de saída
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnSource {
    /// Conceito do registro de apelidos, com cadeia de fallback opcional:
    /// se o conceito primário não resolver, tenta o secundário antes de falhar
    Concept {
        primary: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        fallback: Option<String>,
    },
    /// Valor fixo repetido em todas as linhas
    Literal(String),
}

/// Coluna de saída: nome exportado + origem
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TemplateColumn {
    pub output: String,
    pub source: ColumnSource,
}

impl TemplateColumn {
    /// Coluna cujo nome de saída é o próprio conceito
    pub fn concept(name: &str) -> Self {
        Self {
            output: name.to_string(),
            source: ColumnSource::Concept {
                primary: name.to_string(),
                fallback: None,
            },
        }
    }

    pub fn concept_with_fallback(name: &str, fallback: &str) -> Self {
        Self {
            output: name.to_string(),
            source: ColumnSource::Concept {
                primary: name.to_string(),
                fallback: Some(fallback.to_string()),
            },
        }
    }
}

/// Layout de um template
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum TemplateLayout {
    /// Tabela filtrada passa sem alteração
    Identity,
    /// Lista ordenada de colunas de saída
    Columns(Vec<TemplateColumn>),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Template {
    pub name: String,
    pub layout: TemplateLayout,
}

// ==========================================
// TemplateRegistry - templates registrados
// ==========================================
#[derive(Debug, Clone)]
pub struct TemplateRegistry {
    templates: Vec<Template>,
}

impl TemplateRegistry {
    pub fn new(templates: Vec<Template>) -> Self {
        Self { templates }
    }

    /// Templates padrão: identidade + layout de faturamento
    pub fn builtin() -> Self {
        Self::new(vec![
            Template {
                name: TEMPLATE_IDENTITY.to_string(),
                layout: TemplateLayout::Identity,
            },
            Template {
                name: TEMPLATE_FATURAMENTO.to_string(),
                layout: TemplateLayout::Columns(vec![
                    TemplateColumn::concept("uf"),
                    TemplateColumn::concept_with_fallback("cnpj_cli", "cnpj"),
                    TemplateColumn::concept("razao_social"),
                    TemplateColumn::concept("descricao"),
                    TemplateColumn::concept("qtd_cx"),
                    TemplateColumn::concept("vlr_caixa"),
                ]),
            },
        ])
    }

    pub fn get(&self, name: &str) -> Option<&Template> {
        self.templates.iter().find(|t| t.name == name)
    }

    /// Nomes registrados, para mensagens de erro
    pub fn names(&self) -> Vec<String> {
        self.templates.iter().map(|t| t.name.clone()).collect()
    }
}
