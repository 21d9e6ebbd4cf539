use std::fs;
use std::path::{Path, PathBuf};
use std::process;

use anyhow::{Context, Result, anyhow};
use clap::{Parser, Subcommand};
use post_client::{ImageFile, Post, PostClient, PostClientError, PostDraft};
use tracing_subscriber::{EnvFilter, fmt};

const DEFAULT_SERVER: &str = "http://127.0.0.1:5000";
const SERVER_ENV: &str = "POSTS_SERVER";

#[derive(Debug, Parser)]
#[command(name = "post-cli", version, about = "CLI клиент для сервиса постов")]
struct Cli {
    /// Адрес сервера, например http://127.0.0.1:5000.
    #[arg(long, global = true)]
    server: Option<String>,

    /// Печатать результат в JSON вместо текстового вывода.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Список постов.
    List,
    /// Создание поста. Изображение обязательно.
    Create {
        #[arg(long)]
        title: String,
        #[arg(long)]
        text: String,
        /// Путь к файлу изображения.
        #[arg(long)]
        image: PathBuf,
    },
    /// Обновление поста.
    ///
    /// Если `--image` не указан, сервер сохраняет прежнее изображение.
    Update {
        #[arg(long)]
        id: i64,
        #[arg(long)]
        title: String,
        #[arg(long)]
        text: String,
        #[arg(long)]
        image: Option<PathBuf>,
    },
    /// Удаление поста.
    Delete {
        #[arg(long)]
        id: i64,
    },
}

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("Ошибка: {err}");
        process::exit(1);
    }
}

async fn run() -> Result<()> {
    dotenvy::dotenv().ok();
    init_logging("warn")?;

    let cli = Cli::parse();

    let server = resolve_server(cli.server);
    let mut client = PostClient::new(server);

    match cli.command {
        Command::List => {
            let posts = client.refresh_posts().await.map_err(map_client_error)?;
            if cli.json {
                print_json(&posts)?;
            } else {
                print_list(posts);
            }
        }
        Command::Create { title, text, image } => {
            let image = load_image(&image)?;
            let draft = PostDraft::new(title, text).with_image(image);

            let post = client.create_post(&draft).await.map_err(map_client_error)?;
            if cli.json {
                print_json(&post)?;
            } else {
                print_post("Пост создан", &post);
            }
        }
        Command::Update {
            id,
            title,
            text,
            image,
        } => {
            let mut draft = PostDraft::new(title, text);
            if let Some(path) = image {
                draft = draft.with_image(load_image(&path)?);
            }

            let post = client
                .update_post(id, &draft)
                .await
                .map_err(map_client_error)?;
            if cli.json {
                print_json(&post)?;
            } else {
                print_post("Пост обновлён", &post);
            }
        }
        Command::Delete { id } => {
            client.delete_post(id).await.map_err(map_client_error)?;
            println!("Пост удалён: id={id}");
        }
    }

    Ok(())
}

fn init_logging(default_level: &str) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .compact()
        .try_init()
        .map_err(|e| anyhow!("failed to init logging: {e}"))?;

    Ok(())
}

fn resolve_server(server: Option<String>) -> String {
    let raw = server
        .or_else(|| std::env::var(SERVER_ENV).ok())
        .unwrap_or_else(|| DEFAULT_SERVER.to_string());
    normalize_server(raw)
}

fn normalize_server(server: String) -> String {
    if server.starts_with("http://") || server.starts_with("https://") {
        return server;
    }

    format!("http://{server}")
}

fn load_image(path: &Path) -> Result<ImageFile> {
    let bytes = fs::read(path)
        .with_context(|| format!("не удалось прочитать изображение {}", path.display()))?;

    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "image".to_string());
    let mime = guess_mime(path).to_string();

    Ok(ImageFile {
        file_name,
        mime,
        bytes,
    })
}

fn guess_mime(path: &Path) -> &'static str {
    let extension = path
        .extension()
        .map(|ext| ext.to_string_lossy().to_lowercase());

    match extension.as_deref() {
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("png") => "image/png",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        _ => "application/octet-stream",
    }
}

fn map_client_error(err: PostClientError) -> anyhow::Error {
    let message = match err {
        PostClientError::NotFound => "пост не найден".to_string(),
        PostClientError::Validation(message) => format!("ошибка валидации: {message}"),
        PostClientError::InvalidRequest(message) => format!("некорректный запрос: {message}"),
        PostClientError::Http(err) => format!("ошибка HTTP: {err}"),
    };
    anyhow!(message)
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    let raw = serde_json::to_string_pretty(value).context("не удалось сериализовать ответ")?;
    println!("{raw}");
    Ok(())
}

fn print_post(title: &str, post: &Post) {
    println!("{title}");
    println!("id: {}", post.id);
    println!("title: {}", post.title);
    println!("text: {}", post.text);
    match &post.image {
        Some(image) => println!("image: {image}"),
        None => println!("image: -"),
    }
}

fn print_list(posts: &[Post]) {
    println!("Постов: {}", posts.len());
    for post in posts {
        println!("---");
        print_post(&format!("Пост #{}", post.id), post);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_server_keeps_explicit_scheme() {
        let server = normalize_server("https://example.com".to_string());
        assert_eq!(server, "https://example.com");
    }

    #[test]
    fn normalize_server_adds_http_scheme() {
        let server = normalize_server("127.0.0.1:5000".to_string());
        assert_eq!(server, "http://127.0.0.1:5000");
    }

    #[test]
    fn guess_mime_matches_known_extensions() {
        assert_eq!(guess_mime(Path::new("a.JPG")), "image/jpeg");
        assert_eq!(guess_mime(Path::new("b.png")), "image/png");
        assert_eq!(guess_mime(Path::new("c.bin")), "application/octet-stream");
        assert_eq!(guess_mime(Path::new("noext")), "application/octet-stream");
    }
}
