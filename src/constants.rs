//! Constants used throughout paramgen

/// Joins the segments of a nested template key into one prompt name.
pub const PATH_SEPARATOR: &str = " -> ";

/// Root mapping of a parameters document.
pub const PARAMETERS_ROOT: &str = "parameters";

/// Suffix stripped from the template path to build the default output path.
pub const DIST_SUFFIX: &str = ".dist";

/// STDIN indicator for CLI arguments
pub const STDIN_INDICATOR: &str = "-";

/// Template keys with a fixed meaning.
pub mod keys {
    pub const DATABASE_DRIVER: &str = "database_driver";
    pub const DATABASE_HOST: &str = "database_host";
    pub const DATABASE_PORT: &str = "database_port";
    pub const DATABASE_NAME: &str = "database_name";
    pub const DATABASE_PATH: &str = "database_path";
    pub const DATABASE_USER: &str = "database_user";
    pub const DATABASE_PASSWORD: &str = "database_password";
    pub const INSERT_DEFAULTS: &str = "fom";
    pub const SECRET: &str = "secret";
    pub const LOCALE: &str = "locale";
    pub const FALLBACK_LOCALE: &str = "fallback_locale";

    /// Connection fields that are written as null when left unanswered.
    pub const CONNECTION: &[&str] = &[
        DATABASE_HOST,
        DATABASE_PORT,
        DATABASE_NAME,
        DATABASE_PATH,
        DATABASE_USER,
        DATABASE_PASSWORD,
    ];
}

/// Directory service (LDAP) keys.
pub mod ldap {
    pub const HOST: &str = "ldap_host";
    pub const PORT: &str = "ldap_port";
    pub const VERSION: &str = "ldap_version";
    pub const USER_BASE_DN: &str = "ldap_user_base_dn";
    pub const USER_NAME_ATTRIBUTE: &str = "ldap_user_name_attribute";
    pub const ROLE_BASE_DN: &str = "ldap_role_base_dn";
    pub const ROLE_NAME_ATTRIBUTE: &str = "ldap_role_name_attribute";
    pub const ROLE_USER_ATTRIBUTE: &str = "ldap_role_user_attribute";
    pub const ROLE_USER_ID: &str = "ldap_role_user_id";
    pub const BIND_DN: &str = "ldap_bind_dn";
    pub const BIND_PWD: &str = "ldap_bind_pwd";

    pub const DEFAULT_PORT: u16 = 389;
    pub const VERSIONS: &[&str] = &["3", "2"];
    pub const ROLE_USER_IDS: &[&str] = &["username", "dn"];
    pub const SCHEMES: &[&str] = &["ldap", "ldaps"];
}

/// Defaults offered for database connection prompts.
pub mod database {
    pub const DEFAULT_HOST: &str = "localhost";
    pub const DEFAULT_NAME: &str = "mapbender";
    pub const DEFAULT_PATH: &str = "%kernel.root_dir%/db/database.sqlite";
    pub const POSTGRES_PORT: u16 = 5432;
    pub const MYSQL_PORT: u16 = 3306;
    pub const POSTGRES_USER: &str = "postgres";
    pub const MYSQL_USER: &str = "mysql";
}

/// Well-known placeholder shipped in templates for an unset session secret.
pub const INSECURE_SECRET: &str = "ThisTokenIsNotSoSecretChangeIt";

/// Language codes offered for locale prompts; the first one is the default.
pub const SUPPORTED_LOCALES: &[&str] = &["en", "de", "it", "es"];

/// Validation messages
pub mod validation {
    pub const NOT_A_NUMBER: &str = "This is not a number!";
    pub const PORT_NOT_A_NUMBER: &str = "A port has to be a number";
    pub const PORT_OUT_OF_RANGE: &str = "Port is out of range (1-65535)!";
    pub const INVALID_LDAP_HOST: &str = "This is not a valid ldap-hostname (you have to specify a protocol ldap:// or ldaps://)";
}

/// Exit codes
pub mod exit_codes {
    pub const FAILURE: i32 = 1;
}

/// Verbosity levels
pub mod verbosity {
    pub const OFF: u8 = 0;
    pub const INFO: u8 = 1;
    pub const DEBUG: u8 = 2;
    pub const TRACE: u8 = 3;
}
