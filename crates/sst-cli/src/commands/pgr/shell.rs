//! `sst pgr shell`: walk the PGR hierarchy with a cascading selection.
//!
//! One command per line:
//!
//! ```text
//! select <level> <id>              select an entry and load its children
//! add <level> key=value ...        create under the current selection
//! edit <level> <id> key=value ...  update a listed entry
//! delete <level> <id>              delete (asks first)
//! show [level]                     print the selection or one table
//! clear                            drop the selection, reload companies
//! help | quit
//! ```
//!
//! Values with spaces are quoted: `add sector name="Linha 2"`. An empty
//! value or `-` clears an optional field. When stdin is not a terminal the
//! first failing line aborts the shell.

use std::collections::BTreeMap;
use std::io::{IsTerminal, Write};

use anyhow::Context;
use chrono::NaiveDate;
use sst_client::ApiClient;
use sst_client::navigator::PgrNavigator;
use sst_core::entities::{
    ActionDraft, CompanyDraft, HazardDraft, RiskDraft, SectorDraft, find_by_id,
};
use sst_core::enums::ActionStatus;
use sst_core::selection::PgrLevel;

use super::PgrDeleteResponse;
use crate::cli::{GlobalFlags, OutputFormat};
use crate::commands::shared::confirm::confirm;
use crate::commands::shared::parse::parse_enum;
use crate::context::AppContext;
use crate::output::rows::RiskRow;
use crate::output::{output, output_one, output_rows};
use crate::progress::track;

const HELP: &str = "\
commands:
  select <level> <id>
  add <level> key=value ...
  edit <level> <id> key=value ...
  delete <level> <id>
  show [level]
  clear
  help
  quit
levels: company sector hazard risk action (empresa setor perigo risco acao)";

type Fields = BTreeMap<String, String>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellCommand {
    Select { level: PgrLevel, id: i64 },
    Add { level: PgrLevel, fields: Fields },
    Edit { level: PgrLevel, id: i64, fields: Fields },
    Delete { level: PgrLevel, id: i64 },
    Show(Option<PgrLevel>),
    Clear,
    Help,
    Quit,
}

/// Parse one input line. Blank lines yield `None`.
pub fn parse_line(line: &str) -> anyhow::Result<Option<ShellCommand>> {
    let tokens = tokenize(line)?;
    let Some((verb, rest)) = tokens.split_first() else {
        return Ok(None);
    };

    let command = match verb.to_lowercase().as_str() {
        "select" | "sel" => {
            let [level, id] = exactly::<2>(verb, rest)?;
            ShellCommand::Select {
                level: parse_level(level)?,
                id: parse_id(id)?,
            }
        }
        "add" | "new" => {
            let (level, fields) = rest
                .split_first()
                .with_context(|| format!("usage: {verb} <level> key=value ..."))?;
            ShellCommand::Add {
                level: parse_level(level)?,
                fields: parse_fields(fields)?,
            }
        }
        "edit" => {
            let [level, id, fields @ ..] = rest else {
                anyhow::bail!("usage: edit <level> <id> key=value ...");
            };
            ShellCommand::Edit {
                level: parse_level(level)?,
                id: parse_id(id)?,
                fields: parse_fields(fields)?,
            }
        }
        "delete" | "del" | "rm" => {
            let [level, id] = exactly::<2>(verb, rest)?;
            ShellCommand::Delete {
                level: parse_level(level)?,
                id: parse_id(id)?,
            }
        }
        "show" | "ls" => match rest {
            [] => ShellCommand::Show(None),
            [level] => ShellCommand::Show(Some(parse_level(level)?)),
            _ => anyhow::bail!("usage: show [level]"),
        },
        "clear" | "reset" => ShellCommand::Clear,
        "help" | "?" => ShellCommand::Help,
        "quit" | "exit" | "q" => ShellCommand::Quit,
        other => anyhow::bail!("unknown command '{other}'; type `help`"),
    };
    Ok(Some(command))
}

fn exactly<'a, const N: usize>(verb: &str, rest: &'a [String]) -> anyhow::Result<[&'a str; N]> {
    let parts: Vec<&str> = rest.iter().map(String::as_str).collect();
    parts
        .try_into()
        .map_err(|_| anyhow::anyhow!("usage: {verb} <level> <id>"))
}

/// Split on whitespace, honouring single and double quotes anywhere in a
/// token.
fn tokenize(line: &str) -> anyhow::Result<Vec<String>> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut started = false;
    let mut quote: Option<char> = None;

    for ch in line.chars() {
        match (quote, ch) {
            (Some(open), c) if c == open => quote = None,
            (Some(_), c) => current.push(c),
            (None, '"' | '\'') => {
                quote = Some(ch);
                started = true;
            }
            (None, c) if c.is_whitespace() => {
                if started {
                    tokens.push(std::mem::take(&mut current));
                    started = false;
                }
            }
            (None, c) => {
                current.push(c);
                started = true;
            }
        }
    }
    if let Some(open) = quote {
        anyhow::bail!("unterminated {open} quote");
    }
    if started {
        tokens.push(current);
    }
    Ok(tokens)
}

fn parse_level(raw: &str) -> anyhow::Result<PgrLevel> {
    match raw.to_lowercase().as_str() {
        "company" | "empresa" => Ok(PgrLevel::Company),
        "sector" | "setor" => Ok(PgrLevel::Sector),
        "hazard" | "perigo" => Ok(PgrLevel::Hazard),
        "risk" | "risco" => Ok(PgrLevel::Risk),
        "action" | "acao" | "ação" => Ok(PgrLevel::Action),
        _ => anyhow::bail!("unknown level '{raw}'"),
    }
}

fn parse_id(raw: &str) -> anyhow::Result<i64> {
    raw.parse()
        .map_err(|_| anyhow::anyhow!("invalid id '{raw}'"))
}

fn parse_fields(tokens: &[String]) -> anyhow::Result<Fields> {
    tokens
        .iter()
        .map(|token| match token.split_once('=') {
            Some((key, value)) if !key.trim().is_empty() => {
                Ok((key.trim().to_lowercase(), value.to_string()))
            }
            _ => anyhow::bail!("expected key=value, got '{token}'"),
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Field application
// ---------------------------------------------------------------------------

fn text(value: &str) -> String {
    value.trim().to_string()
}

fn optional(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty() && value != "-").then(|| value.to_string())
}

fn number<T: std::str::FromStr>(key: &str, value: &str) -> anyhow::Result<T> {
    value
        .trim()
        .parse()
        .map_err(|_| anyhow::anyhow!("{key}: '{value}' is not a number"))
}

fn unknown(level: PgrLevel, key: &str, known: &[&str]) -> anyhow::Error {
    anyhow::anyhow!("unknown {level} field '{key}'; expected one of: {}", known.join(", "))
}

fn apply_company(draft: &mut CompanyDraft, fields: &Fields) -> anyhow::Result<()> {
    const KNOWN: &[&str] = &["name", "tax_id", "address", "activity", "risk_grade"];
    for (key, value) in fields {
        match key.as_str() {
            "name" => draft.name = text(value),
            "tax_id" | "cnpj" => draft.tax_id = optional(value),
            "address" => draft.address = optional(value),
            "activity" => draft.activity = optional(value),
            "risk_grade" => {
                draft.risk_grade = optional(value).map(|v| number(key, &v)).transpose()?;
            }
            other => return Err(unknown(PgrLevel::Company, other, KNOWN)),
        }
    }
    Ok(())
}

fn apply_sector(draft: &mut SectorDraft, fields: &Fields) -> anyhow::Result<()> {
    const KNOWN: &[&str] = &["name", "description"];
    for (key, value) in fields {
        match key.as_str() {
            "name" => draft.name = text(value),
            "description" => draft.description = optional(value),
            other => return Err(unknown(PgrLevel::Sector, other, KNOWN)),
        }
    }
    Ok(())
}

fn apply_hazard(draft: &mut HazardDraft, fields: &Fields) -> anyhow::Result<()> {
    const KNOWN: &[&str] = &["name", "agent", "source", "description"];
    for (key, value) in fields {
        match key.as_str() {
            "name" => draft.name = text(value),
            "agent" => draft.agent = optional(value),
            "source" => draft.source = optional(value),
            "description" => draft.description = optional(value),
            other => return Err(unknown(PgrLevel::Hazard, other, KNOWN)),
        }
    }
    Ok(())
}

fn apply_risk(draft: &mut RiskDraft, fields: &Fields) -> anyhow::Result<()> {
    const KNOWN: &[&str] = &["probability", "severity", "measures"];
    for (key, value) in fields {
        match key.as_str() {
            "probability" | "p" => draft.probability = number(key, value)?,
            "severity" | "s" => draft.severity = number(key, value)?,
            "measures" => draft.existing_measures = optional(value),
            other => return Err(unknown(PgrLevel::Risk, other, KNOWN)),
        }
    }
    Ok(())
}

fn apply_action(draft: &mut ActionDraft, fields: &Fields) -> anyhow::Result<()> {
    const KNOWN: &[&str] = &["recommendation", "kind", "deadline", "responsible", "status"];
    for (key, value) in fields {
        match key.as_str() {
            "recommendation" => draft.recommendation = text(value),
            "kind" => draft.kind = optional(value),
            "deadline" => {
                draft.deadline = optional(value)
                    .map(|v| NaiveDate::parse_from_str(&v, "%Y-%m-%d"))
                    .transpose()
                    .map_err(|_| anyhow::anyhow!("deadline: '{value}' is not YYYY-MM-DD"))?;
            }
            "responsible" => draft.responsible = optional(value),
            "status" => draft.status = parse_enum::<ActionStatus>(value, "status")?,
            other => return Err(unknown(PgrLevel::Action, other, KNOWN)),
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Session
// ---------------------------------------------------------------------------

struct Shell<'a> {
    ctx: &'a AppContext,
    flags: &'a GlobalFlags,
    nav: PgrNavigator<&'a ApiClient>,
}

/// Run the shell until `quit` or end of input.
pub async fn run(ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let mut shell = Shell {
        ctx,
        flags,
        nav: PgrNavigator::new(&ctx.client),
    };
    track("loading companies", shell.nav.load_companies())
        .await
        .context("failed to load companies")?;
    shell.show_level(PgrLevel::Company)?;

    let interactive = std::io::stdin().is_terminal();
    let mut line = String::new();
    loop {
        if interactive {
            eprint!("{}", shell.prompt());
            std::io::stderr().flush()?;
        }
        line.clear();
        if std::io::stdin().read_line(&mut line)? == 0 {
            break;
        }

        let outcome = match parse_line(&line) {
            Ok(None) => continue,
            Ok(Some(ShellCommand::Quit)) => break,
            Ok(Some(command)) => shell.execute(command).await,
            Err(error) => Err(error),
        };
        if let Err(error) = outcome {
            if !interactive {
                return Err(error.context(format!("pgr shell: {}", line.trim())));
            }
            eprintln!("error: {error:#}");
        }
    }
    Ok(())
}

impl Shell<'_> {
    fn prompt(&self) -> String {
        let chain = self.nav.state().selection.chain();
        if chain.is_empty() {
            return "pgr> ".to_string();
        }
        let ids: Vec<String> = chain.iter().map(ToString::to_string).collect();
        format!("pgr[{}]> ", ids.join("/"))
    }

    async fn execute(&mut self, command: ShellCommand) -> anyhow::Result<()> {
        match command {
            ShellCommand::Select { level, id } => {
                track(&format!("loading under {level} {id}"), self.nav.select(level, id)).await?;
                match level.child() {
                    Some(child) => self.show_level(child),
                    None => Ok(()),
                }
            }
            ShellCommand::Add { level, fields } => self.add(level, &fields).await,
            ShellCommand::Edit { level, id, fields } => self.edit(level, id, &fields).await,
            ShellCommand::Delete { level, id } => {
                if !confirm(&format!("Delete {level} {id}?"), self.flags)? {
                    return output(&PgrDeleteResponse { level, id, deleted: false }, self.format());
                }
                let was_selected =
                    track(&format!("deleting {level} {id}"), self.nav.delete(level, id)).await?;
                if was_selected {
                    eprintln!("selection cleared from {level} down");
                }
                output(&PgrDeleteResponse { level, id, deleted: true }, self.format())
            }
            ShellCommand::Show(Some(level)) => self.show_level(level),
            ShellCommand::Show(None) => {
                output(&self.nav.state().selection, self.format())?;
                for level in PgrLevel::ALL {
                    if self.nav.state().tables.len(level) > 0 {
                        self.show_level(level)?;
                    }
                }
                Ok(())
            }
            ShellCommand::Clear => {
                track("loading companies", self.nav.reset()).await?;
                self.show_level(PgrLevel::Company)
            }
            ShellCommand::Help => {
                eprintln!("{HELP}");
                Ok(())
            }
            ShellCommand::Quit => Ok(()),
        }
    }

    async fn add(&mut self, level: PgrLevel, fields: &Fields) -> anyhow::Result<()> {
        let parent = self.nav.parent_for_create(level)?.unwrap_or_default();
        let client = &self.ctx.client;
        let scale = self.ctx.pgr_scale;
        let format = self.format();

        match level {
            PgrLevel::Company => {
                let mut draft = CompanyDraft::default();
                apply_company(&mut draft, fields)?;
                output_one(&track("saving company", client.create_company(&draft)).await?, format)?;
            }
            PgrLevel::Sector => {
                let mut draft = SectorDraft {
                    company_id: parent,
                    ..SectorDraft::default()
                };
                apply_sector(&mut draft, fields)?;
                output_one(&track("saving sector", client.create_sector(&draft)).await?, format)?;
            }
            PgrLevel::Hazard => {
                let mut draft = HazardDraft {
                    sector_id: parent,
                    ..HazardDraft::default()
                };
                apply_hazard(&mut draft, fields)?;
                output_one(&track("saving hazard", client.create_hazard(&draft)).await?, format)?;
            }
            PgrLevel::Risk => {
                let mut draft = RiskDraft {
                    hazard_id: parent,
                    ..RiskDraft::default()
                };
                apply_risk(&mut draft, fields)?;
                let saved = track("saving risk", client.create_risk(&draft)).await?;
                output_one(&RiskRow::new(saved, scale), format)?;
            }
            PgrLevel::Action => {
                let mut draft = ActionDraft {
                    risk_id: parent,
                    ..ActionDraft::default()
                };
                apply_action(&mut draft, fields)?;
                output_one(&track("saving action", client.create_action(&draft)).await?, format)?;
            }
        }
        self.nav.reload(level).await?;
        Ok(())
    }

    async fn edit(&mut self, level: PgrLevel, id: i64, fields: &Fields) -> anyhow::Result<()> {
        let client = &self.ctx.client;
        let scale = self.ctx.pgr_scale;
        let format = self.format();
        let tables = &self.nav.state().tables;
        let entity = level.as_str();

        match level {
            PgrLevel::Company => {
                let mut draft = CompanyDraft::from(find_by_id(&tables.companies, entity, id)?);
                apply_company(&mut draft, fields)?;
                let saved = track("updating company", client.update_company(id, &draft)).await?;
                output_one(&saved, format)?;
            }
            PgrLevel::Sector => {
                let mut draft = SectorDraft::from(find_by_id(&tables.sectors, entity, id)?);
                apply_sector(&mut draft, fields)?;
                let saved = track("updating sector", client.update_sector(id, &draft)).await?;
                output_one(&saved, format)?;
            }
            PgrLevel::Hazard => {
                let mut draft = HazardDraft::from(find_by_id(&tables.hazards, entity, id)?);
                apply_hazard(&mut draft, fields)?;
                let saved = track("updating hazard", client.update_hazard(id, &draft)).await?;
                output_one(&saved, format)?;
            }
            PgrLevel::Risk => {
                let mut draft = RiskDraft::from(find_by_id(&tables.risks, entity, id)?);
                apply_risk(&mut draft, fields)?;
                let saved = track("updating risk", client.update_risk(id, &draft)).await?;
                output_one(&RiskRow::new(saved, scale), format)?;
            }
            PgrLevel::Action => {
                let mut draft = ActionDraft::from(find_by_id(&tables.actions, entity, id)?);
                apply_action(&mut draft, fields)?;
                let saved = track("updating action", client.update_action(id, &draft)).await?;
                output_one(&saved, format)?;
            }
        }
        self.nav.reload(level).await?;
        Ok(())
    }

    fn show_level(&self, level: PgrLevel) -> anyhow::Result<()> {
        let format = self.format();
        let tables = &self.nav.state().tables;
        if format == OutputFormat::Table {
            println!("[{level}]");
        }
        match level {
            PgrLevel::Company => output_rows(&tables.companies, format),
            PgrLevel::Sector => output_rows(&tables.sectors, format),
            PgrLevel::Hazard => output_rows(&tables.hazards, format),
            PgrLevel::Risk => output_rows(&RiskRow::rows(&tables.risks, self.ctx.pgr_scale), format),
            PgrLevel::Action => output_rows(&tables.actions, format),
        }
    }

    const fn format(&self) -> OutputFormat {
        self.flags.format
    }
}
