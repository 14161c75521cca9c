use chrono::NaiveDate;
use clap::{Args, Subcommand};

/// PGR hierarchy commands.
#[derive(Clone, Debug, Subcommand)]
pub enum PgrCommands {
    /// Companies (top level).
    Company {
        #[command(subcommand)]
        action: CompanyCommands,
    },
    /// Sectors of a company.
    Sector {
        #[command(subcommand)]
        action: SectorCommands,
    },
    /// Hazards of a sector.
    Hazard {
        #[command(subcommand)]
        action: HazardCommands,
    },
    /// Risks of a hazard.
    Risk {
        #[command(subcommand)]
        action: RiskCommands,
    },
    /// Actions of a risk.
    Action {
        #[command(subcommand)]
        action: ActionCommands,
    },
    /// Interactive navigator: select down the hierarchy, add, edit, delete.
    Shell,
}

#[derive(Clone, Debug, Subcommand)]
pub enum CompanyCommands {
    List,
    Create(CompanyArgs),
    Update {
        id: i64,
        #[command(flatten)]
        company: CompanyArgs,
    },
    Delete {
        id: i64,
    },
}

#[derive(Clone, Debug, Args)]
pub struct CompanyArgs {
    #[arg(long)]
    pub name: String,
    #[arg(long = "tax-id", visible_alias = "cnpj")]
    pub tax_id: Option<String>,
    #[arg(long)]
    pub address: Option<String>,
    #[arg(long)]
    pub activity: Option<String>,
    /// NR-4 risk grade, 1-4.
    #[arg(long)]
    pub risk_grade: Option<u8>,
}

#[derive(Clone, Debug, Subcommand)]
pub enum SectorCommands {
    List {
        #[arg(long)]
        company: i64,
    },
    Create {
        #[arg(long)]
        company: i64,
        #[command(flatten)]
        sector: SectorArgs,
    },
    Update {
        id: i64,
        #[arg(long)]
        company: i64,
        #[command(flatten)]
        sector: SectorArgs,
    },
    Delete {
        id: i64,
    },
}

#[derive(Clone, Debug, Args)]
pub struct SectorArgs {
    #[arg(long)]
    pub name: String,
    #[arg(long)]
    pub description: Option<String>,
}

#[derive(Clone, Debug, Subcommand)]
pub enum HazardCommands {
    List {
        #[arg(long)]
        sector: i64,
    },
    Create {
        #[arg(long)]
        sector: i64,
        #[command(flatten)]
        hazard: HazardArgs,
    },
    Update {
        id: i64,
        #[arg(long)]
        sector: i64,
        #[command(flatten)]
        hazard: HazardArgs,
    },
    Delete {
        id: i64,
    },
}

#[derive(Clone, Debug, Args)]
pub struct HazardArgs {
    #[arg(long)]
    pub name: String,
    #[arg(long)]
    pub agent: Option<String>,
    #[arg(long)]
    pub source: Option<String>,
    #[arg(long)]
    pub description: Option<String>,
}

#[derive(Clone, Debug, Subcommand)]
pub enum RiskCommands {
    List {
        #[arg(long)]
        hazard: i64,
    },
    Create {
        #[arg(long)]
        hazard: i64,
        #[command(flatten)]
        risk: RiskArgs,
    },
    Update {
        id: i64,
        #[arg(long)]
        hazard: i64,
        #[command(flatten)]
        risk: RiskArgs,
    },
    Delete {
        id: i64,
    },
    /// Level, band and measures of one risk.
    Show {
        id: i64,
        #[arg(long)]
        hazard: i64,
    },
}

#[derive(Clone, Debug, Args)]
pub struct RiskArgs {
    /// 1-5.
    #[arg(long)]
    pub probability: u8,
    /// 1-5.
    #[arg(long)]
    pub severity: u8,
    /// Control measures already in place.
    #[arg(long)]
    pub measures: Option<String>,
}

#[derive(Clone, Debug, Subcommand)]
pub enum ActionCommands {
    List {
        #[arg(long)]
        risk: i64,
    },
    Create {
        #[arg(long)]
        risk: i64,
        #[command(flatten)]
        action: ActionArgs,
    },
    Update {
        id: i64,
        #[arg(long)]
        risk: i64,
        #[command(flatten)]
        action: ActionArgs,
    },
    Delete {
        id: i64,
    },
}

#[derive(Clone, Debug, Args)]
pub struct ActionArgs {
    #[arg(long)]
    pub recommendation: String,
    #[arg(long)]
    pub kind: Option<String>,
    /// Deadline, YYYY-MM-DD.
    #[arg(long)]
    pub deadline: Option<NaiveDate>,
    #[arg(long)]
    pub responsible: Option<String>,
    /// pendente, em_andamento or concluida.
    #[arg(long, default_value = "pendente")]
    pub status: String,
}
