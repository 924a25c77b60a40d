//! Names of every key held by the env register.
//!
//! Each name doubles as the process environment variable that overrides it.

pub const ENV: &str = "ENV";
pub const VERSION: &str = "VERSION";
pub const AUTHORIZER_URL: &str = "AUTHORIZER_URL";
pub const PORT: &str = "PORT";
pub const ADMIN_SECRET: &str = "ADMIN_SECRET";
pub const DATABASE_URL: &str = "DATABASE_URL";
pub const DATABASE_TYPE: &str = "DATABASE_TYPE";
pub const REDIS_URL: &str = "REDIS_URL";
pub const SMTP_HOST: &str = "SMTP_HOST";
pub const SMTP_PORT: &str = "SMTP_PORT";
pub const SMTP_USERNAME: &str = "SMTP_USERNAME";
pub const SMTP_PASSWORD: &str = "SMTP_PASSWORD";
pub const SENDER_EMAIL: &str = "SENDER_EMAIL";
pub const JWT_TYPE: &str = "JWT_TYPE";
pub const JWT_SECRET: &str = "JWT_SECRET";
pub const JWT_ROLE_CLAIM: &str = "JWT_ROLE_CLAIM";
pub const COOKIE_NAME: &str = "COOKIE_NAME";
pub const RESET_PASSWORD_URL: &str = "RESET_PASSWORD_URL";
pub const ORGANIZATION_NAME: &str = "ORGANIZATION_NAME";
pub const ORGANIZATION_LOGO: &str = "ORGANIZATION_LOGO";
pub const GOOGLE_CLIENT_ID: &str = "GOOGLE_CLIENT_ID";
pub const GOOGLE_CLIENT_SECRET: &str = "GOOGLE_CLIENT_SECRET";
pub const GITHUB_CLIENT_ID: &str = "GITHUB_CLIENT_ID";
pub const GITHUB_CLIENT_SECRET: &str = "GITHUB_CLIENT_SECRET";

/// Symmetric key for the persisted env record. Never serialized into the
/// record it encrypts and never overridden from the process environment
/// during reconciliation.
pub const ENCRYPTION_KEY: &str = "ENCRYPTION_KEY";

pub const DISABLE_EMAIL_VERIFICATION: &str = "DISABLE_EMAIL_VERIFICATION";
pub const DISABLE_BASIC_AUTHENTICATION: &str = "DISABLE_BASIC_AUTHENTICATION";
pub const DISABLE_MAGIC_LINK_LOGIN: &str = "DISABLE_MAGIC_LINK_LOGIN";
pub const DISABLE_LOGIN_PAGE: &str = "DISABLE_LOGIN_PAGE";

pub const ALLOWED_ORIGINS: &str = "ALLOWED_ORIGINS";
pub const ROLES: &str = "ROLES";
pub const DEFAULT_ROLES: &str = "DEFAULT_ROLES";
pub const PROTECTED_ROLES: &str = "PROTECTED_ROLES";

/// String-valued keys.
pub const STRING_KEYS: &[&str] = &[
    ENV,
    VERSION,
    AUTHORIZER_URL,
    PORT,
    ADMIN_SECRET,
    DATABASE_URL,
    DATABASE_TYPE,
    REDIS_URL,
    SMTP_HOST,
    SMTP_PORT,
    SMTP_USERNAME,
    SMTP_PASSWORD,
    SENDER_EMAIL,
    JWT_TYPE,
    JWT_SECRET,
    JWT_ROLE_CLAIM,
    COOKIE_NAME,
    RESET_PASSWORD_URL,
    ORGANIZATION_NAME,
    ORGANIZATION_LOGO,
    GOOGLE_CLIENT_ID,
    GOOGLE_CLIENT_SECRET,
    GITHUB_CLIENT_ID,
    GITHUB_CLIENT_SECRET,
    ENCRYPTION_KEY,
];

/// Boolean-valued keys.
pub const BOOL_KEYS: &[&str] = &[
    DISABLE_EMAIL_VERIFICATION,
    DISABLE_BASIC_AUTHENTICATION,
    DISABLE_MAGIC_LINK_LOGIN,
    DISABLE_LOGIN_PAGE,
];

/// List-valued keys.
pub const LIST_KEYS: &[&str] = &[ALLOWED_ORIGINS, ROLES, DEFAULT_ROLES, PROTECTED_ROLES];
