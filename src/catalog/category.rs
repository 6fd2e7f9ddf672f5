use serde::{Deserialize, Serialize};

pub const ELEMENT_LIST_TABLE: &str = "element_list_db";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CategoryGroup {
    Functional,
    Assurance,
    Fallback,
}

/// Destination table of a classification record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Fau,
    Fco,
    Fcs,
    Fdp,
    Fia,
    Fmt,
    Fpr,
    Fpt,
    Fru,
    Fta,
    Ftp,
    Aco,
    Adv,
    Agd,
    Alc,
    Ape,
    Ase,
    Ate,
    Ava,
    /// Anything whose class identifier is absent or unknown.
    Components,
}

impl Category {
    pub const ALL: [Category; 20] = [
        Category::Fau,
        Category::Fco,
        Category::Fcs,
        Category::Fdp,
        Category::Fia,
        Category::Fmt,
        Category::Fpr,
        Category::Fpt,
        Category::Fru,
        Category::Fta,
        Category::Ftp,
        Category::Aco,
        Category::Adv,
        Category::Agd,
        Category::Alc,
        Category::Ape,
        Category::Ase,
        Category::Ate,
        Category::Ava,
        Category::Components,
    ];

    /// Total over all strings: unknown and empty identifiers route to
    /// `Category::Components`.
    pub fn from_class_id(class_id: &str) -> Self {
        match class_id {
            "fau" => Category::Fau,
            "fco" => Category::Fco,
            "fcs" => Category::Fcs,
            "fdp" => Category::Fdp,
            "fia" => Category::Fia,
            "fmt" => Category::Fmt,
            "fpr" => Category::Fpr,
            "fpt" => Category::Fpt,
            "fru" => Category::Fru,
            "fta" => Category::Fta,
            "ftp" => Category::Ftp,
            "aco" => Category::Aco,
            "adv" => Category::Adv,
            "agd" => Category::Agd,
            "alc" => Category::Alc,
            "ape" => Category::Ape,
            "ase" => Category::Ase,
            "ate" => Category::Ate,
            "ava" => Category::Ava,
            _ => Category::Components,
        }
    }

    /// Class identifier this category is keyed by; empty for the fallback.
    pub fn class_id(self) -> &'static str {
        match self {
            Category::Fau => "fau",
            Category::Fco => "fco",
            Category::Fcs => "fcs",
            Category::Fdp => "fdp",
            Category::Fia => "fia",
            Category::Fmt => "fmt",
            Category::Fpr => "fpr",
            Category::Fpt => "fpt",
            Category::Fru => "fru",
            Category::Fta => "fta",
            Category::Ftp => "ftp",
            Category::Aco => "aco",
            Category::Adv => "adv",
            Category::Agd => "agd",
            Category::Alc => "alc",
            Category::Ape => "ape",
            Category::Ase => "ase",
            Category::Ate => "ate",
            Category::Ava => "ava",
            Category::Components => "",
        }
    }

    pub fn table_name(self) -> &'static str {
        match self {
            Category::Fau => "fau_db",
            Category::Fco => "fco_db",
            Category::Fcs => "fcs_db",
            Category::Fdp => "fdp_db",
            Category::Fia => "fia_db",
            Category::Fmt => "fmt_db",
            Category::Fpr => "fpr_db",
            Category::Fpt => "fpt_db",
            Category::Fru => "fru_db",
            Category::Fta => "fta_db",
            Category::Ftp => "ftp_db",
            Category::Aco => "aco_db",
            Category::Adv => "adv_db",
            Category::Agd => "agd_db",
            Category::Alc => "alc_db",
            Category::Ape => "ape_db",
            Category::Ase => "ase_db",
            Category::Ate => "ate_db",
            Category::Ava => "ava_db",
            Category::Components => "components",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Category::Fau => "Security audit",
            Category::Fco => "Communication",
            Category::Fcs => "Cryptographic support",
            Category::Fdp => "User data protection",
            Category::Fia => "Identification and authentication",
            Category::Fmt => "Security management",
            Category::Fpr => "Privacy",
            Category::Fpt => "Protection of the TSF",
            Category::Fru => "Resource utilisation",
            Category::Fta => "TOE access",
            Category::Ftp => "Trusted path/channels",
            Category::Aco => "Composition",
            Category::Adv => "Development",
            Category::Agd => "Guidance documents",
            Category::Alc => "Life-cycle support",
            Category::Ape => "Protection Profile evaluation",
            Category::Ase => "Security Target evaluation",
            Category::Ate => "Tests",
            Category::Ava => "Vulnerability assessment",
            Category::Components => "Unclassified components",
        }
    }

    pub fn group(self) -> CategoryGroup {
        match self {
            Category::Fau
            | Category::Fco
            | Category::Fcs
            | Category::Fdp
            | Category::Fia
            | Category::Fmt
            | Category::Fpr
            | Category::Fpt
            | Category::Fru
            | Category::Fta
            | Category::Ftp => CategoryGroup::Functional,
            Category::Aco
            | Category::Adv
            | Category::Agd
            | Category::Alc
            | Category::Ape
            | Category::Ase
            | Category::Ate
            | Category::Ava => CategoryGroup::Assurance,
            Category::Components => CategoryGroup::Fallback,
        }
    }

    pub fn from_table_name(table: &str) -> Option<Self> {
        Category::ALL.into_iter().find(|c| c.table_name() == table)
    }
}
