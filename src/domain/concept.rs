// ==========================================
// Gerador de Relatórios - Registro de conceitos
// ==========================================
// Responsabilidade: conceito de negócio -> lista ordenada de apelidos
// Carregado uma vez na inicialização, imutável depois disso
// ==========================================

/// Nomes canônicos dos conceitos usados pela API
pub const CONCEPT_FORNECEDOR: &str = "fornecedor";
pub const CONCEPT_FILIAL: &str = "filial";
pub const CONCEPT_DATA: &str = "data";

/// Conceito de negócio: nome canônico + apelidos aceitos
///
/// Os apelidos são tentados na ordem declarada, do mais específico
/// para o mais genérico. A ordem decide empates na resolução.
#[derive(Debug, Clone)]
pub struct Concept {
    name: String,
    aliases: Vec<String>,
}

impl Concept {
    pub fn new(name: &str, aliases: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            aliases: aliases.iter().map(|a| a.to_string()).collect(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn aliases(&self) -> &[String] {
        &self.aliases
    }
}

// ==========================================
// AliasRegistry - tabela de apelidos
// ==========================================
// Substitui mapeamentos por fornecedor espalhados em código: a
// resolução nunca trata um fornecedor específico por nome, tudo
// que é particular de layout vira dado aqui ou em templates.
#[derive(Debug, Clone)]
pub struct AliasRegistry {
    concepts: Vec<Concept>,
}

impl AliasRegistry {
    pub fn new(concepts: Vec<Concept>) -> Self {
        Self { concepts }
    }

    /// Registro padrão dos conceitos de faturamento
    pub fn builtin() -> Self {
        Self::new(vec![
            Concept::new(
                CONCEPT_FORNECEDOR,
                &["fornecedor", "fornec", "laboratorio", "industria"],
            ),
            Concept::new(CONCEPT_FILIAL, &["filial", "loja", "unidade"]),
            Concept::new(
                CONCEPT_DATA,
                &["data_emissao", "dt_emissao", "emissao", "data"],
            ),
            Concept::new("uf", &["uf", "estado"]),
            Concept::new("cnpj_cli", &["cnpj_cli", "cnpj_cliente"]),
            Concept::new("cnpj", &["cnpj"]),
            Concept::new("razao_social", &["razao_social", "razao", "cliente"]),
            Concept::new("descricao", &["descricao", "desc_produto", "produto"]),
            Concept::new("qtd_cx", &["qtd_cx", "qtde_cx", "qtd_caixas", "quantidade"]),
            Concept::new("vlr_caixa", &["vlr_caixa", "vlr_cx", "valor_caixa", "preco"]),
        ])
    }

    pub fn get(&self, name: &str) -> Option<&Concept> {
        self.concepts.iter().find(|c| c.name() == name)
    }

    pub fn concepts(&self) -> &[Concept] {
        &self.concepts
    }
}
