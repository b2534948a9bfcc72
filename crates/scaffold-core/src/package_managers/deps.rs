//! Packages installed into every new project

/// `(name, version)`; `None` installs the latest release
pub type DependencyList = &'static [(&'static str, Option<&'static str>)];

pub const DEPENDENCIES: DependencyList = &[];

pub const DEV_DEPENDENCIES: DependencyList = &[
    ("@arethetypeswrong/cli", None),
    ("@typescript-eslint/eslint-plugin", None),
    ("@typescript-eslint/parser", None),
    ("eslint", Some("^8")),
    ("eslint-import-resolver-typescript", None),
    ("eslint-plugin-import", None),
    ("eslint-plugin-vitest", None),
    ("husky", None),
    ("lint-staged", None),
    ("prettier", None),
    ("publint", None),
    ("tsup", None),
    ("typescript", None),
    ("vitest", None),
];

/// Install specifiers: `name` or `name@version`
pub fn specifiers(list: DependencyList) -> Vec<String> {
    list.iter()
        .map(|(name, version)| match version {
            Some(version) => format!("{}@{}", name, version),
            None => (*name).to_string(),
        })
        .collect()
}
