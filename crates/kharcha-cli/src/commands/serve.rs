//! Server command implementation

use std::path::Path;

use anyhow::Result;

use super::open_db;

pub async fn cmd_serve(
    db_path: &Path,
    host: &str,
    port: u16,
    no_auth: bool,
    no_encrypt: bool,
    static_dir: Option<&Path>,
    allowed_origins: Vec<String>,
) -> Result<()> {
    println!("🚀 Starting Kharcha web server...");
    println!("   Database: {}", db_path.display());
    println!("   Listening: http://{}:{}", host, port);
    if let Some(dir) = static_dir {
        println!("   Static files: {}", dir.display());
    }
    if !allowed_origins.is_empty() {
        println!("   CORS origins: {}", allowed_origins.join(", "));
    }

    if no_auth {
        println!();
        println!("   ⚠️  Authentication DISABLED - do not expose to network!");
    } else {
        println!("   🔒 Authentication: upstream auth layer (x-user-id header)");
    }
    if no_encrypt {
        println!("   ⚠️  Encryption DISABLED (--no-encrypt)");
    }
    println!();
    println!("   Press Ctrl+C to stop");

    let db = open_db(db_path, no_encrypt)?;

    let config = kharcha_server::ServerConfig {
        require_auth: !no_auth,
        allowed_origins,
    };

    let static_dir_str = static_dir
        .map(|p| {
            p.to_str()
                .ok_or_else(|| anyhow::anyhow!("static_dir path must be valid UTF-8"))
        })
        .transpose()?;
    kharcha_server::serve_with_config(db, host, port, static_dir_str, config).await?;

    Ok(())
}
