use std::path::PathBuf;

use taskboard_core::{AppConfig, BoardError, BoardResult};
use taskboard_domain::{Card, CardEditor, CardId, Session};
use taskboard_state::BoardStore;

use crate::cli::Cli;

/// Everything a command needs: the loaded board, the config it was loaded
/// with, and the session of the user running it.
pub struct CliContext {
    pub store: BoardStore,
    pub config: AppConfig,
    pub session: Session,
}

impl CliContext {
    /// Log in and open the board. Credentials are checked before the board
    /// file is touched.
    pub async fn open(cli: &Cli) -> BoardResult<Self> {
        let config = match &cli.config {
            Some(path) => AppConfig::load_from(path),
            None => AppConfig::load(),
        };

        let session = match (&cli.username, &cli.password) {
            (Some(username), Some(password)) => {
                Session::login(username, password, &config.credentials)?
            }
            _ => {
                return Err(BoardError::Unauthorized(
                    "Login required: pass --username and --password".into(),
                ))
            }
        };
        tracing::debug!("Logged in as {}", session.username());

        let path: PathBuf = cli
            .file
            .clone()
            .unwrap_or_else(|| config.effective_data_file());
        let store = BoardStore::open(&path).await;

        Ok(Self {
            store,
            config,
            session,
        })
    }

    /// Open an editor on `card_id`, apply `edit`, then save the card back
    /// through the store in one write.
    pub async fn edit_card<T>(
        &mut self,
        card_id: CardId,
        edit: impl FnOnce(&mut CardEditor, &Session, &AppConfig) -> BoardResult<T>,
    ) -> BoardResult<(Card, T)> {
        let mut editor = self.store.open_editor(card_id)?;
        let outcome = edit(&mut editor, &self.session, &self.config)?;
        let card = self.store.save_editor(editor).await?;
        Ok((card, outcome))
    }
}
