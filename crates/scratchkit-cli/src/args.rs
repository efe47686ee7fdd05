use std::ffi::OsString;

use clap::Parser;

pub const FAILURE_EXIT_CODE: u8 = 1;

// Both surfaces take positionals only: every token counts toward the arity,
// so there are no help/version flags and aliases may start with '-'.

#[derive(Parser, Debug)]
#[command(name = "create-scratch-npsp")]
#[command(disable_help_flag = true, disable_version_flag = true)]
pub struct ProvisionCli {
    /// Alias given to the new scratch org.
    #[arg(value_name = "SCRATCH_ORG_ALIAS", allow_hyphen_values = true)]
    pub alias: String,
    /// Dev Hub that owns the scratch org.
    #[arg(value_name = "DEV_HUB_ALIAS", allow_hyphen_values = true)]
    pub dev_hub_alias: String,
}

#[derive(Parser, Debug)]
#[command(name = "enable-multi-currency")]
#[command(disable_help_flag = true, disable_version_flag = true)]
pub struct CurrencyCli {
    /// Org that receives the currency settings.
    #[arg(value_name = "ORG_ALIAS", allow_hyphen_values = true)]
    pub alias: String,
}

/// Parses `args`, printing clap's usage error on a wrong argument count.
pub fn parse_cli<C, I, T>(args: I) -> Result<C, u8>
where
    C: Parser,
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    C::try_parse_from(args).map_err(|err| {
        let _ = err.print();
        FAILURE_EXIT_CODE
    })
}
