//! Suggestion lists for the free-text dropdown fields. These are offered by
//! the UI but not enforced by the store; rows loaded from older databases may
//! carry values outside these lists and keep them verbatim.

pub const STATUS_CHOICES: [&str; 5] = [
    "Novo",
    "Em contato",
    "Retornar ligação",
    "Fechou matrícula",
    "Sem interesse",
];

pub const HOW_FOUND_CHOICES: [&str; 9] = [
    "Indicação",
    "Google",
    "Instagram",
    "Facebook",
    "WhatsApp",
    "Ligação",
    "Outdoor",
    "Passagem/Frente da unidade",
    "Outros",
];

pub const COURSE_FOR_CHOICES: [&str; 6] = [
    "Próprio",
    "Filho(a)",
    "Neto(a)",
    "Sobrinho(a)",
    "Parceiro(a)",
    "Outro",
];

pub const DEFAULT_STATUS: &str = "Novo";
pub const DEFAULT_HOW_FOUND: &str = "Indicação";
pub const DEFAULT_COURSE_FOR: &str = "Próprio";
