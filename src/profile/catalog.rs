use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_MODEL;

/// Deployed assistant variant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum ProfileKind {
    /// Real-estate market assistant
    #[default]
    #[value(name = "real-estate")]
    RealEstate,
    /// Carbon-credit assistant limited to the VM0042 methodology
    #[serde(rename = "vm0042-basic")]
    #[value(name = "vm0042-basic")]
    Vm0042Basic,
    /// VM0042 assistant covering quantification, MRV and project documents
    #[serde(rename = "vm0042-extended")]
    #[value(name = "vm0042-extended")]
    Vm0042Extended,
}

impl ProfileKind {
    pub const ALL: [ProfileKind; 3] = [
        ProfileKind::RealEstate,
        ProfileKind::Vm0042Basic,
        ProfileKind::Vm0042Extended,
    ];

    /// Identifier used in config files and on the command line
    pub fn id(&self) -> &'static str {
        match self {
            Self::RealEstate => "real-estate",
            Self::Vm0042Basic => "vm0042-basic",
            Self::Vm0042Extended => "vm0042-extended",
        }
    }

    pub fn profile(&self) -> &'static DomainProfile {
        match self {
            Self::RealEstate => &REAL_ESTATE,
            Self::Vm0042Basic => &VM0042_BASIC,
            Self::Vm0042Extended => &VM0042_EXTENDED,
        }
    }
}

/// Static configuration bundle of one assistant variant.
///
/// Profiles are plain data and are never mutated at runtime.
#[derive(Debug, Clone, PartialEq)]
pub struct DomainProfile {
    /// Title shown in the header
    pub title: &'static str,
    /// Restriction instruction placed before every question
    pub system_prompt: &'static str,
    /// Suggested questions, in display order
    pub suggested_questions: &'static [&'static str],
    /// Model requested from the completion service
    pub model: &'static str,
    /// Subject phrase completing "só responde perguntas relacionadas ..."
    pub scope: &'static str,
}

impl DomainProfile {
    /// Greeting shown once the user has given a name
    pub fn welcome(&self, name: &str) -> String {
        format!(
            "Bem-vindo, {}! Este assistente só responde perguntas relacionadas {}.",
            name, self.scope
        )
    }
}

pub static REAL_ESTATE: DomainProfile = DomainProfile {
    title: "AssistenteCorretor",
    system_prompt: "Você é um assistente especializado em ajudar usuários com questões relacionadas ao mercado imobiliário.\n\
Não responda perguntas que não sejam sobre imóveis, compra, venda, aluguel, ou outros tópicos diretamente relacionados ao mercado imobiliário.\n\
Se uma pergunta estiver fora do contexto do mercado imobiliário, gentilmente explique ao usuário que você só pode responder perguntas dentro desse contexto.",
    suggested_questions: &[
        "Como conseguir compradores (leads)?",
        "Onde encontrar imóveis?",
        "Como divulgar um imóvel nas redes sociais?",
        "Como fazer um hot-site com fotos?",
        "Criar um modelo de contrato de visita, compra e venda.",
    ],
    model: DEFAULT_MODEL,
    scope: "ao mercado imobiliário",
};

pub static VM0042_BASIC: DomainProfile = DomainProfile {
    title: "AssistenteVM0042",
    system_prompt: "Você é um assistente especializado em créditos de carbono e na metodologia VM0042 da Verra (Improved Agricultural Land Management).\n\
Responda apenas perguntas sobre a metodologia VM0042, créditos de carbono gerados por práticas agrícolas e tópicos diretamente relacionados.\n\
Se uma pergunta estiver fora desse contexto, gentilmente explique ao usuário que você só pode responder perguntas sobre a metodologia VM0042.",
    suggested_questions: &[
        "O que é a metodologia VM0042?",
        "Quais práticas agrícolas são elegíveis na VM0042?",
        "Como é definida a linha de base de carbono no solo?",
        "Quais são os requisitos de monitoramento da VM0042?",
        "Como registrar um projeto VM0042 na Verra?",
    ],
    model: DEFAULT_MODEL,
    scope: "à metodologia VM0042 de créditos de carbono",
};

pub static VM0042_EXTENDED: DomainProfile = DomainProfile {
    title: "AssistenteVM0042 Avançado",
    system_prompt: "Você é um consultor técnico especializado na metodologia VM0042 da Verra (Improved Agricultural Land Management) e no mercado voluntário de carbono.\n\
Responda apenas perguntas sobre elegibilidade, quantificação de remoções e reduções de emissões, modelagem de carbono no solo, monitoramento, relato e verificação (MRV), documentação de projeto e emissão de VCUs no contexto da VM0042.\n\
Quando útil, cite a seção da metodologia ou do VCS Standard que fundamenta a resposta.\n\
Se uma pergunta estiver fora desse contexto, gentilmente explique ao usuário que você só pode responder perguntas sobre a metodologia VM0042.",
    suggested_questions: &[
        "Como quantificar reduções de emissões de N2O em um projeto VM0042?",
        "Quais modelos biogeoquímicos são aceitos para estimar o carbono do solo?",
        "Como estruturar o plano de amostragem de solo?",
        "Como tratar incertezas e a contribuição ao buffer de não permanência?",
        "O que deve conter o Documento de Concepção do Projeto (PDD)?",
        "Como funcionam a verificação e a emissão de VCUs?",
    ],
    model: DEFAULT_MODEL,
    scope: "à metodologia VM0042 de créditos de carbono",
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_kind_has_a_complete_profile() {
        for kind in ProfileKind::ALL {
            let profile = kind.profile();
            assert!(!profile.title.is_empty());
            assert!(!profile.system_prompt.is_empty());
            assert!(!profile.suggested_questions.is_empty());
            assert!(!profile.model.is_empty());
        }
    }

    #[test]
    fn test_profile_ids_match_serde_names() {
        for kind in ProfileKind::ALL {
            let json = serde_json::to_string(&kind).unwrap();
            assert_eq!(json, format!("\"{}\"", kind.id()));
        }
    }

    #[test]
    fn test_welcome_includes_name_and_scope() {
        let welcome = REAL_ESTATE.welcome("Ana");
        assert_eq!(
            welcome,
            "Bem-vindo, Ana! Este assistente só responde perguntas relacionadas ao mercado imobiliário."
        );
    }

    #[test]
    fn test_variants_differ_only_in_data() {
        assert_ne!(REAL_ESTATE.system_prompt, VM0042_BASIC.system_prompt);
        assert_ne!(VM0042_BASIC.suggested_questions, VM0042_EXTENDED.suggested_questions);
    }
}
