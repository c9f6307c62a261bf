use std::path::PathBuf;
use std::sync::Arc;

use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tracing::debug;

pub mod parser;
pub mod error;
pub mod config;
pub mod shell;
pub mod store;
pub mod telemetry;

use error::{InventoryError, Result};
use parser::Parser;
use store::{ActivityLog, Store};

/// State carried across the commands of one shell session.
pub struct Session {
    pub store: Arc<Store>,
    pub log: ActivityLog,
    pub data_path: PathBuf,
    pub threshold: i64,
    pub autosave: bool,
}

impl Session {
    pub fn new(store: Arc<Store>, data_path: PathBuf, threshold: i64, autosave: bool) -> Self {
        Self {
            store,
            log: ActivityLog::new(),
            data_path,
            threshold,
            autosave,
        }
    }
}

/// Reads command lines until EOF or `QUIT`, writing one reply per line.
///
/// Command failures are reported inline and do not end the session.
pub async fn handle_session<R, W>(reader: R, mut writer: W, session: &mut Session) -> Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut lines = reader.lines();

    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }

        let command = Parser::parse(&line)
            .map_err(InventoryError::Parser)
            .and_then(Command::from_words);

        let reply = match command {
            Ok(Command::Quit) => break,
            Ok(command) => {
                debug!(?command, "executing");
                command.execute(session).await
            }
            Err(e) => Err(e),
        };

        let text = match reply {
            Ok(text) => text,
            Err(e) => format!("(error) {}\n", e),
        };
        writer.write_all(text.as_bytes()).await?;
        writer.flush().await?;
    }

    Ok(())
}

#[derive(Debug, PartialEq, Eq)]
pub enum Command {
    Add(String, i64),
    Remove(String, i64),
    Qty(String),
    Low(Option<i64>),
    Report,
    Save(Option<PathBuf>),
    Load(Option<PathBuf>),
    History,
    Demo,
    Quit,
}

impl Command {
    pub fn from_words(words: Vec<String>) -> Result<Self> {
        let (command, args) = words.split_first()
            .ok_or(InventoryError::InvalidArguments)?;

        match command.to_uppercase().as_str() {
            "ADD" => {
                let item = Self::item_arg(args)?;
                let quantity = match args.get(1) {
                    Some(arg) => Self::integer_arg(arg)?,
                    None => 0,
                };
                Self::no_extra(args, 2)?;
                Ok(Command::Add(item, quantity))
            }
            "REMOVE" => {
                let item = Self::item_arg(args)?;
                let quantity = args.get(1)
                    .ok_or(InventoryError::InvalidArguments)
                    .and_then(|arg| Self::integer_arg(arg))?;
                Self::no_extra(args, 2)?;
                Ok(Command::Remove(item, quantity))
            }
            "QTY" => {
                let item = Self::item_arg(args)?;
                Self::no_extra(args, 1)?;
                Ok(Command::Qty(item))
            }
            "LOW" => {
                let threshold = args.first()
                    .map(|arg| Self::integer_arg(arg))
                    .transpose()?;
                Self::no_extra(args, 1)?;
                Ok(Command::Low(threshold))
            }
            "SAVE" => {
                Self::no_extra(args, 1)?;
                Ok(Command::Save(args.first().map(PathBuf::from)))
            }
            "LOAD" => {
                Self::no_extra(args, 1)?;
                Ok(Command::Load(args.first().map(PathBuf::from)))
            }
            "REPORT" => Self::no_extra(args, 0).map(|_| Command::Report),
            "HISTORY" => Self::no_extra(args, 0).map(|_| Command::History),
            "DEMO" => Self::no_extra(args, 0).map(|_| Command::Demo),
            "QUIT" | "EXIT" => Ok(Command::Quit),
            _ => Err(InventoryError::UnknownCommand(command.clone())),
        }
    }

    fn item_arg(args: &[String]) -> Result<String> {
        args.first().cloned().ok_or(InventoryError::InvalidArguments)
    }

    fn integer_arg(arg: &str) -> Result<i64> {
        arg.parse().map_err(|_| InventoryError::InvalidArguments)
    }

    fn no_extra(args: &[String], max: usize) -> Result<()> {
        if args.len() > max {
            return Err(InventoryError::InvalidArguments);
        }
        Ok(())
    }

    pub async fn execute(&self, session: &mut Session) -> Result<String> {
        let store = Arc::clone(&session.store);
        Ok(match self {
            Command::Add(item, quantity) => {
                store.add(item, *quantity, Some(&mut session.log)).await;
                Self::autosave(session).await?;
                "OK\n".to_string()
            }
            Command::Remove(item, quantity) => {
                store.remove(item, *quantity).await;
                Self::autosave(session).await?;
                "OK\n".to_string()
            }
            Command::Qty(item) => format!("{}\n", store.get_quantity(item).await?),
            Command::Low(threshold) => {
                let items = store.low_stock_items(threshold.unwrap_or(session.threshold)).await;
                Self::lines_or_empty(&items)
            }
            Command::Report => {
                let mut out = Vec::new();
                store.report(&mut out).await?;
                String::from_utf8_lossy(&out).into_owned()
            }
            Command::Save(path) => {
                store.save(path.as_ref().unwrap_or(&session.data_path)).await?;
                "OK\n".to_string()
            }
            Command::Load(path) => {
                store.load(path.as_ref().unwrap_or(&session.data_path)).await;
                "OK\n".to_string()
            }
            Command::History => Self::lines_or_empty(session.log.lines()),
            Command::Demo => Self::demo(session).await?,
            Command::Quit => String::new(),
        })
    }

    async fn autosave(session: &Session) -> Result<()> {
        if session.autosave {
            session.store.save(&session.data_path).await?;
        }
        Ok(())
    }

    fn lines_or_empty(lines: &[String]) -> String {
        if lines.is_empty() {
            return "(empty)\n".to_string();
        }
        let mut out = lines.join("\n");
        out.push('\n');
        out
    }

    /// Walkthrough of every store operation against the session's store and data file.
    async fn demo(session: &mut Session) -> Result<String> {
        let store = Arc::clone(&session.store);
        let mut out = String::new();

        store.add("apple", 10, Some(&mut session.log)).await;
        store.add("banana", -2, Some(&mut session.log)).await;
        store.remove("apple", 3).await;
        store.remove("orange", 1).await;

        out.push_str(&format!("Apple stock: {}\n", store.get_quantity("apple").await?));
        out.push_str(&format!(
            "Low items: {:?}\n",
            store.low_stock_items(session.threshold).await
        ));

        store.save(&session.data_path).await?;
        store.load(&session.data_path).await;

        let mut report = Vec::new();
        store.report(&mut report).await?;
        out.push_str(&String::from_utf8_lossy(&report));
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(line: &str) -> Vec<String> {
        Parser::parse(line).unwrap()
    }

    fn session_in(dir: &tempfile::TempDir) -> Session {
        Session::new(
            Arc::new(Store::new()),
            dir.path().join("inventory.json"),
            5,
            false,
        )
    }

    async fn run(session: &mut Session, input: &str) -> String {
        let mut output = Vec::new();
        handle_session(input.as_bytes(), &mut output, session).await.unwrap();
        String::from_utf8(output).unwrap()
    }

    #[test]
    fn parses_commands_case_insensitively() {
        assert_eq!(Command::from_words(words("add apple 10")).unwrap(), Command::Add("apple".into(), 10));
        assert_eq!(Command::from_words(words("ADD apple")).unwrap(), Command::Add("apple".into(), 0));
        assert_eq!(Command::from_words(words("Remove pear -1")).unwrap(), Command::Remove("pear".into(), -1));
        assert_eq!(Command::from_words(words("low")).unwrap(), Command::Low(None));
        assert_eq!(Command::from_words(words("ADD 'red apple' 3")).unwrap(), Command::Add("red apple".into(), 3));
        assert_eq!(
            Command::from_words(words("save backup.json")).unwrap(),
            Command::Save(Some(PathBuf::from("backup.json")))
        );
    }

    #[test]
    fn rejects_bad_arguments() {
        assert!(matches!(Command::from_words(words("add apple ten")), Err(InventoryError::InvalidArguments)));
        assert!(matches!(Command::from_words(words("remove apple")), Err(InventoryError::InvalidArguments)));
        assert!(matches!(Command::from_words(words("report now")), Err(InventoryError::InvalidArguments)));
        assert!(matches!(Command::from_words(words("sell apple")), Err(InventoryError::UnknownCommand(c)) if c == "sell"));
    }

    #[tokio::test]
    async fn session_replies_per_line() {
        let dir = tempfile::tempdir().unwrap();
        let mut session = session_in(&dir);

        let output = run(
            &mut session,
            "ADD apple 10\nADD banana -2\nREMOVE apple 3\nQTY apple\nQTY orange\nLOW\nREPORT\n",
        )
        .await;

        assert_eq!(
            output,
            "OK\nOK\nOK\n7\n(error) item not found: orange\nbanana\nItems Report\napple -> 7\nbanana -> -2\n"
        );
        assert_eq!(session.log.len(), 2);
    }

    #[tokio::test]
    async fn quit_stops_reading() {
        let dir = tempfile::tempdir().unwrap();
        let mut session = session_in(&dir);

        let output = run(&mut session, "ADD apple 1\nquit\nADD apple 1\n").await;

        assert_eq!(output, "OK\n");
        assert_eq!(session.store.get_quantity("apple").await.unwrap(), 1);
    }

    #[tokio::test]
    async fn parse_errors_do_not_end_session() {
        let dir = tempfile::tempdir().unwrap();
        let mut session = session_in(&dir);

        let output = run(&mut session, "ADD \"apple 1\n\nHISTORY\n").await;

        assert_eq!(output, "(error) Parser error: Unterminated quote\n(empty)\n");
    }

    #[tokio::test]
    async fn save_and_load_use_configured_path() {
        let dir = tempfile::tempdir().unwrap();
        let mut session = session_in(&dir);

        run(&mut session, "ADD \"red apple\" 4\nSAVE\nREMOVE \"red apple\" 4\nLOAD\n").await;

        assert_eq!(session.store.get_quantity("red apple").await.unwrap(), 4);
        assert!(dir.path().join("inventory.json").exists());
    }

    #[tokio::test]
    async fn autosave_writes_after_mutation() {
        let dir = tempfile::tempdir().unwrap();
        let mut session = session_in(&dir);
        session.autosave = true;

        run(&mut session, "ADD apple 2\n").await;

        let saved = std::fs::read_to_string(dir.path().join("inventory.json")).unwrap();
        assert_eq!(saved, r#"{"apple":2}"#);
    }

    #[tokio::test]
    async fn demo_walks_through_every_operation() {
        let dir = tempfile::tempdir().unwrap();
        let mut session = session_in(&dir);

        let output = run(&mut session, "DEMO\n").await;

        assert_eq!(
            output,
            "Apple stock: 7\nLow items: [\"banana\"]\nItems Report\napple -> 7\nbanana -> -2\n"
        );
        assert_eq!(session.log.len(), 2);
    }
}
