use anyhow::Result;
use url::Url;

/// Parse a user-typed URL, assuming `https://` when no scheme was given
pub fn normalize_url(url: &str) -> Result<Url> {
    let url = url.trim();
    let with_scheme = if url.contains("://") {
        url.to_string()
    } else {
        format!("https://{}", url)
    };

    let parsed = Url::parse(&with_scheme)
        .map_err(|_| anyhow::anyhow!("Invalid URL format: {}", url))?;

    if !matches!(parsed.scheme(), "http" | "https") {
        anyhow::bail!("URL must use HTTP or HTTPS protocol");
    }

    Ok(parsed)
}

/// Check if the current environment has required tools
pub async fn check_dependencies(yt_dlp_path: &str) -> Vec<String> {
    let mut missing = Vec::new();

    if !check_command_available(yt_dlp_path).await {
        missing.push(format!("{} - required for fetching YouTube captions", yt_dlp_path));
    }

    missing
}

/// Check if a command is available in PATH
async fn check_command_available(command: &str) -> bool {
    use tokio::process::Command;

    Command::new(command)
        .arg("--version")
        .output()
        .await
        .map(|output| output.status.success())
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_url() {
        assert_eq!(
            normalize_url("https://www.youtube.com/watch?v=dQw4w9WgXcQ").unwrap().as_str(),
            "https://www.youtube.com/watch?v=dQw4w9WgXcQ"
        );
        assert_eq!(
            normalize_url("  youtu.be/dQw4w9WgXcQ ").unwrap().as_str(),
            "https://youtu.be/dQw4w9WgXcQ"
        );
        assert!(normalize_url("ftp://youtube.com/x").is_err());
    }

    #[tokio::test]
    async fn test_check_dependencies_reports_missing_tool() {
        let missing = check_dependencies("definitely-not-a-real-yt-dlp-binary").await;
        assert_eq!(missing.len(), 1);
        assert!(missing[0].starts_with("definitely-not-a-real-yt-dlp-binary"));
    }
}
