/*!
Command handlers for the CLI

- `serve`: run the HTTP gateway (see [`crate::server`])
- `history`: inspect the session log
*/

pub mod history;

use crate::config::Config;
use crate::error::Result;

/// Run the HTTP gateway until interrupted
pub async fn serve(config: Config) -> Result<()> {
    crate::server::start_server(&config).await
}
