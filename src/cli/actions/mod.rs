pub mod server;

use secrecy::SecretString;

#[derive(Debug)]
pub enum Action {
    Server {
        port: u16,
        dsn: String,
        session_secret: Option<SecretString>,
        dev: bool,
        session_ttl_seconds: i64,
        cookie_secure: bool,
    },
}
