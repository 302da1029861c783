//! `hackathon apply --team <name> ... --member "<name>:<email>" ...`

use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;

use hackathon_core::{Member, NewApplication};

/// Submit a team application.
#[derive(Args, Debug)]
pub struct ApplyArgs {
    /// Team name; must be unique (case-insensitive).
    #[arg(long)]
    pub team: String,

    /// Team lead's full name.
    #[arg(long)]
    pub lead_name: String,

    /// Team lead's email address.
    #[arg(long)]
    pub lead_email: String,

    /// Team lead's phone number.
    #[arg(long, default_value = "")]
    pub lead_phone: String,

    /// Team member as "<name>:<email>". Repeat 2 to 4 times.
    #[arg(long = "member", short = 'm', value_name = "NAME:EMAIL")]
    pub members: Vec<MemberArg>,

    /// Experience level (e.g. beginner, intermediate, advanced).
    #[arg(long, default_value = "beginner")]
    pub experience: String,
}

/// A `--member` value split at its last `:`.
#[derive(Debug, Clone)]
pub struct MemberArg(pub Member);

impl FromStr for MemberArg {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.rsplit_once(':') {
            Some((name, email)) if !name.trim().is_empty() && !email.trim().is_empty() => {
                Ok(Self(Member::new(name, email)))
            }
            _ => Err(format!("invalid member '{s}'; expected NAME:EMAIL")),
        }
    }
}

impl ApplyArgs {
    pub fn run(self, data_dir: Option<PathBuf>) -> Result<()> {
        let mut registry = super::open_registry(data_dir)?;
        let team = self.team.clone();
        let application = registry
            .create_application(NewApplication {
                team_name: self.team,
                team_lead_name: self.lead_name,
                team_lead_email: self.lead_email,
                team_lead_phone: self.lead_phone,
                members: self.members.into_iter().map(|m| m.0).collect(),
                experience: self.experience,
            })
            .with_context(|| format!("application for '{team}' was not accepted"))?;

        println!("✓ Application submitted for '{}'", application.team_name);
        println!("  Application ID: {}", application.id.to_string().bold());
        println!("  Save this ID to check your status and submit your project.");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn member_arg_splits_at_last_colon() {
        let m = MemberArg::from_str("Dr. No: Evil:no@x.com").unwrap();
        assert_eq!(m.0.name, "Dr. No: Evil");
        assert_eq!(m.0.email, "no@x.com");
    }

    #[test]
    fn member_arg_requires_both_parts() {
        assert!(MemberArg::from_str("no-colon").is_err());
        assert!(MemberArg::from_str(":a@x.com").is_err());
        assert!(MemberArg::from_str("Name:").is_err());
    }
}
