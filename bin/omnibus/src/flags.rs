//! Flags shared by the subcommands.

use anyhow::{Context, Result};
use clap::Args;
use omnibus_actions::{Omnibus, OmnibusConfig};
use omnibus_contracts::RegistryConfig;
use std::path::PathBuf;
use tracing::info;

/// Locates the contract registry and the omnibus file.
#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct OmnibusArgs {
    /// Path to the contract registry TOML file.
    #[arg(long, env = "OMNIBUS_REGISTRY")]
    pub registry: PathBuf,
    /// Path to the omnibus TOML file.
    #[arg(long, env = "OMNIBUS_FILE")]
    pub omnibus: PathBuf,
}

impl OmnibusArgs {
    /// Loads both files and resolves the omnibus against its network.
    pub fn load(&self) -> Result<Omnibus> {
        let registry = RegistryConfig::from_file(&self.registry).with_context(|| {
            format!("Failed to load contract registry {}", self.registry.display())
        })?;
        let config = OmnibusConfig::from_file(&self.omnibus)
            .with_context(|| format!("Failed to load omnibus {}", self.omnibus.display()))?;
        let omnibus = config
            .build(&registry)
            .with_context(|| format!("Failed to resolve omnibus on network {}", config.network))?;
        info!(
            target: "omnibus",
            network = %config.network,
            actions = omnibus.actions().len(),
            "Loaded omnibus",
        );
        Ok(omnibus)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    pub(crate) const REGISTRY: &str = r#"
        [networks.mainnet]
        chain_id = 1
        voting = "0x2e59A20f205bB85a89C53f1936454680651E618e"
        agent = "0x3e40D73EB977Dc6a537aF587D48316feE66E9C8c"
        calls_script = "0x5cEb19e1890f677c3676d5ecDF7c501eBA01A054"
        finance = "0xB9E5CBB9CA5b0d659238807E84D0176930753d86"
        curated_staking_module = "0x55032650b14df07b85bF18A3a3eC8E0Af2e028d5"
        ldo = "0x5A98FcBEA516Cf06857215779Fd812CA3beF1B32"
    "#;

    pub(crate) const TRANSFER: &str = r#"
        network = "mainnet"

        [[actions]]
        type = "transfer-assets"
        title = "Fund grants"
        to = "0x12a43b049A7D330cB8aEAB5113032D18AE9a9030"
        token = "ldo"
        amount = "500"
    "#;

    pub(crate) fn temp_file(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    pub(crate) fn args(registry: &NamedTempFile, omnibus: &NamedTempFile) -> OmnibusArgs {
        OmnibusArgs { registry: registry.path().into(), omnibus: omnibus.path().into() }
    }

    #[test]
    fn test_load() {
        let (registry, omnibus) = (temp_file(REGISTRY), temp_file(TRANSFER));
        let omnibus = args(&registry, &omnibus).load().unwrap();
        assert_eq!(omnibus.actions().len(), 1);
        assert_eq!(omnibus.contracts().network, "mainnet");
    }

    #[test]
    fn test_load_reports_network() {
        let registry = temp_file(REGISTRY);
        let omnibus = temp_file(&TRANSFER.replace("mainnet", "holesky"));
        let err = args(&registry, &omnibus).load().unwrap_err();
        assert!(err.to_string().contains("holesky"), "{err}");
    }
}
