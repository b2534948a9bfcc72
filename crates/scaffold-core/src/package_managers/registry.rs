//! Static table of supported package managers

use crate::error::ScaffoldError;
use std::fmt;
use std::str::FromStr;

/// Supported package managers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PackageManager {
    Yarn,
    Npm,
    Pnpm,
    Bun,
}

/// A subcommand plus its named flags
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Subcommand {
    /// `None` when the manager takes the argument directly (e.g. `yarn <script>`)
    pub command: Option<&'static str>,
    pub flags: &'static [(&'static str, &'static str)],
}

impl Subcommand {
    pub fn flag(&self, name: &str) -> Option<&'static str> {
        self.flags
            .iter()
            .find(|(key, _)| *key == name)
            .map(|(_, value)| *value)
    }
}

/// A side effect run around the manager's own init/install sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleStep {
    /// Create an empty file relative to the project root if missing
    Touch(&'static str),
    /// Run the manager binary with these arguments
    Run(&'static [&'static str]),
    /// Delete a file relative to the project root; a missing file is fine
    Remove(&'static str),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Lifecycles {
    pub preinit: &'static [LifecycleStep],
    pub postinit: &'static [LifecycleStep],
}

/// Which lifecycle hook to run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hook {
    PreInit,
    PostInit,
}

/// Commands and hooks for one manager
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Profile {
    pub init: Subcommand,
    pub install: Subcommand,
    pub run: Subcommand,
    pub lifecycles: Lifecycles,
}

const YARN: Profile = Profile {
    init: Subcommand {
        command: Some("init"),
        flags: &[("yes", "-y")],
    },
    install: Subcommand {
        command: Some("add"),
        flags: &[("dev", "-D")],
    },
    run: Subcommand {
        command: None,
        flags: &[],
    },
    lifecycles: Lifecycles {
        // Yarn berry refuses to init inside a parent project without its own lockfile
        preinit: &[
            LifecycleStep::Touch("yarn.lock"),
            LifecycleStep::Run(&["set", "version", "stable"]),
        ],
        postinit: &[],
    },
};

const NPM: Profile = Profile {
    init: Subcommand {
        command: Some("init"),
        flags: &[("yes", "-y")],
    },
    install: Subcommand {
        command: Some("install"),
        flags: &[("dev", "-D")],
    },
    run: Subcommand {
        command: Some("run"),
        flags: &[],
    },
    lifecycles: Lifecycles {
        preinit: &[],
        postinit: &[],
    },
};

const PNPM: Profile = Profile {
    init: Subcommand {
        command: Some("init"),
        flags: &[],
    },
    install: Subcommand {
        command: Some("add"),
        flags: &[("dev", "-D")],
    },
    run: Subcommand {
        command: None,
        flags: &[],
    },
    lifecycles: Lifecycles {
        preinit: &[],
        postinit: &[],
    },
};

const BUN: Profile = Profile {
    init: Subcommand {
        command: Some("init"),
        flags: &[("yes", "-y")],
    },
    install: Subcommand {
        command: Some("add"),
        flags: &[("dev", "-d")],
    },
    run: Subcommand {
        command: Some("run"),
        flags: &[],
    },
    lifecycles: Lifecycles {
        preinit: &[],
        // bun init writes a starter index.ts at the root
        postinit: &[LifecycleStep::Remove("index.ts")],
    },
};

impl PackageManager {
    pub const ALL: [PackageManager; 4] = [
        PackageManager::Yarn,
        PackageManager::Npm,
        PackageManager::Pnpm,
        PackageManager::Bun,
    ];

    /// Identifier used on the command line and as the binary name
    pub fn id(&self) -> &'static str {
        match self {
            PackageManager::Yarn => "yarn",
            PackageManager::Npm => "npm",
            PackageManager::Pnpm => "pnpm",
            PackageManager::Bun => "bun",
        }
    }

    pub fn profile(&self) -> &'static Profile {
        match self {
            PackageManager::Yarn => &YARN,
            PackageManager::Npm => &NPM,
            PackageManager::Pnpm => &PNPM,
            PackageManager::Bun => &BUN,
        }
    }

    pub fn supported_ids() -> Vec<&'static str> {
        Self::ALL.iter().map(PackageManager::id).collect()
    }

    pub fn lifecycle(&self, hook: Hook) -> &'static [LifecycleStep] {
        let lifecycles = &self.profile().lifecycles;
        match hook {
            Hook::PreInit => lifecycles.preinit,
            Hook::PostInit => lifecycles.postinit,
        }
    }

    /// Arguments for a non-interactive `init`
    pub fn init_args(&self) -> Vec<String> {
        let init = &self.profile().init;
        init.command
            .into_iter()
            .chain(init.flag("yes"))
            .map(String::from)
            .collect()
    }

    /// Arguments installing `packages`, as dev dependencies when `dev` is set
    pub fn install_args(&self, packages: &[String], dev: bool) -> Vec<String> {
        let install = &self.profile().install;
        install
            .command
            .into_iter()
            .chain(install.flag("dev").filter(|_| dev))
            .map(String::from)
            .chain(packages.iter().cloned())
            .collect()
    }

    /// Shell command running a package script, for use inside `scripts`
    pub fn run_script(&self, script: &str) -> String {
        match self.profile().run.command {
            Some(command) => format!("{} {} {}", self.id(), command, script),
            None => format!("{} {}", self.id(), script),
        }
    }
}

impl fmt::Display for PackageManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id())
    }
}

impl FromStr for PackageManager {
    type Err = ScaffoldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|pm| pm.id() == s)
            .ok_or_else(|| ScaffoldError::UnsupportedPackageManager(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_supported_ids() {
        for id in PackageManager::supported_ids() {
            let pm: PackageManager = id.parse().unwrap();
            assert_eq!(pm.id(), id);
        }
        assert!(matches!(
            "cargo".parse::<PackageManager>(),
            Err(ScaffoldError::UnsupportedPackageManager(_))
        ));
        assert!("Yarn".parse::<PackageManager>().is_err());
    }

    #[test]
    fn test_init_args() {
        assert_eq!(PackageManager::Yarn.init_args(), ["init", "-y"]);
        assert_eq!(PackageManager::Pnpm.init_args(), ["init"]);
    }

    #[test]
    fn test_install_args() {
        let pkgs = vec!["tsup".to_string(), "vitest".to_string()];
        assert_eq!(
            PackageManager::Yarn.install_args(&pkgs, true),
            ["add", "-D", "tsup", "vitest"]
        );
        assert_eq!(
            PackageManager::Npm.install_args(&pkgs, false),
            ["install", "tsup", "vitest"]
        );
        assert_eq!(
            PackageManager::Bun.install_args(&pkgs, true),
            ["add", "-d", "tsup", "vitest"]
        );
    }

    #[test]
    fn test_run_script() {
        assert_eq!(PackageManager::Yarn.run_script("type"), "yarn type");
        assert_eq!(PackageManager::Npm.run_script("type"), "npm run type");
    }

    #[test]
    fn test_lifecycles() {
        assert_eq!(PackageManager::Yarn.lifecycle(Hook::PreInit).len(), 2);
        assert!(PackageManager::Yarn.lifecycle(Hook::PostInit).is_empty());
        assert!(PackageManager::Npm.lifecycle(Hook::PreInit).is_empty());
        assert_eq!(
            PackageManager::Bun.lifecycle(Hook::PostInit),
            [LifecycleStep::Remove("index.ts")]
        );
    }
}
