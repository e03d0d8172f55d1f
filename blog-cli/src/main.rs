use blog_client::BlogClientHttp;
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[clap(about = "Command line client for the blog API")]
struct Cli {
    #[clap(short, long, default_value = "http://127.0.0.1:8080")]
    server: String,

    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    Register {
        #[clap(long)]
        username: String,
        #[clap(long)]
        password: String,
    },
    Login {
        #[clap(long)]
        username: String,
        #[clap(long)]
        password: String,
    },
    ListPosts,
    GetPost {
        id: i64,
    },
    CreatePost {
        #[clap(long)]
        title: String,
        #[clap(long)]
        content: String,
    },
    UpdatePost {
        id: i64,
        #[clap(long)]
        title: String,
        #[clap(long)]
        content: String,
    },
    DeletePost {
        id: i64,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Cli::parse();

    let mut client = BlogClientHttp::connect(&args.server)?;

    match args.command {
        Command::Register { username, password } => {
            let message = client.register(&username, &password).await?;
            println!("{}", message);
        }
        Command::Login { username, password } => {
            client.login(&username, &password).await?;
            println!("Successfully logged in!");
        }
        Command::ListPosts => {
            let posts = client.list_posts().await?;
            println!("Posts ({})", posts.len());
            for post in posts {
                println!("- [{}] {}", post.id, post.title);
            }
        }
        Command::GetPost { id } => {
            let post = client.get_post(id).await?;
            println!("{}", post);
        }
        Command::CreatePost { title, content } => {
            let id = client.create_post(&title, &content).await?;
            println!("Post created! ID: {}", id);
        }
        Command::UpdatePost { id, title, content } => {
            client.update_post(id, &title, &content).await?;
            println!("Post {} updated", id);
        }
        Command::DeletePost { id } => {
            client.delete_post(id).await?;
            println!("Post deleted!");
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_update_command() {
        let cli = Cli::try_parse_from([
            "blog-cli",
            "update-post",
            "7",
            "--title",
            "New",
            "--content",
            "Body",
        ])
        .unwrap();

        assert_eq!(cli.server, "http://127.0.0.1:8080");
        assert!(matches!(
            cli.command,
            Command::UpdatePost { id: 7, ref title, ref content } if title == "New" && content == "Body"
        ));
    }

    #[test]
    fn rejects_non_numeric_post_id() {
        assert!(Cli::try_parse_from(["blog-cli", "get-post", "abc"]).is_err());
    }
}
