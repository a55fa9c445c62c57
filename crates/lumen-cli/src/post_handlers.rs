//! Handler functions for `lumen posts {list,show,related}`.

use lumen_content::{PostMeta, PostProvider, score};
use lumen_core::{Error, Result};

use crate::cli::PostsAction;

/// Handle a posts subcommand against any corpus.
pub async fn handle_posts_command(posts: &dyn PostProvider, action: PostsAction) -> Result<()> {
    let output = match action {
        PostsAction::List { category } => list(posts, category.as_deref()).await?,
        PostsAction::Show { slug } => show(posts, &slug).await?,
        PostsAction::Related { slug, limit } => related(posts, &slug, limit).await?,
    };
    print!("{output}");
    Ok(())
}

async fn list(posts: &dyn PostProvider, category: Option<&str>) -> Result<String> {
    let metas = match category {
        Some(category) => posts.list_by_category(category).await?,
        None => posts.list_all().await?,
    };

    if metas.is_empty() {
        return Ok("No posts found.\n".to_string());
    }

    let mut out = String::new();
    for meta in &metas {
        out.push_str(&list_line(meta));
    }
    out.push_str(&format!("\n{} post(s)\n", metas.len()));
    Ok(out)
}

async fn show(posts: &dyn PostProvider, slug: &str) -> Result<String> {
    let post = posts
        .get_one(slug)
        .await?
        .ok_or_else(|| Error::not_found(format!("post '{slug}'")))?;
    let meta = &post.meta;

    let mut out = format!("{}\n", meta.title);
    out.push_str(&format!("{}\n", "=".repeat(meta.title.chars().count().max(3))));
    out.push_str(&format!("slug:      {}\n", meta.slug));
    out.push_str(&format!("date:      {}\n", meta.date));
    out.push_str(&format!("author:    {}\n", meta.author));
    out.push_str(&format!("category:  {}\n", meta.category));
    if !meta.tags.is_empty() {
        out.push_str(&format!("tags:      {}\n", meta.tags.join(", ")));
    }
    if let Some(read_time) = &meta.read_time {
        out.push_str(&format!("read time: {read_time}\n"));
    }
    out.push('\n');
    out.push_str(post.content.trim_end());
    out.push('\n');
    Ok(out)
}

async fn related(posts: &dyn PostProvider, slug: &str, limit: usize) -> Result<String> {
    let all = posts.list_all().await?;
    let subject = all
        .iter()
        .find(|p| p.slug == slug)
        .ok_or_else(|| Error::not_found(format!("post '{slug}'")))?;

    let ranked = posts.related(slug, limit).await?.unwrap_or_default();
    if ranked.is_empty() {
        return Ok("No related posts.\n".to_string());
    }

    let mut out = String::new();
    for candidate in &ranked {
        out.push_str(&format!(
            "{:>4}  {}  {}\n",
            score(subject, candidate),
            candidate.slug,
            candidate.title
        ));
    }
    Ok(out)
}

fn list_line(meta: &PostMeta) -> String {
    if meta.category.is_empty() {
        format!("{:<12}  {}  {}\n", meta.date, meta.slug, meta.title)
    } else {
        format!(
            "{:<12}  {}  {} [{}]\n",
            meta.date, meta.slug, meta.title, meta.category
        )
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use lumen_content::PostStore;
    use std::path::Path;
    use tempfile::TempDir;

    fn write_post(dir: &Path, slug: &str, frontmatter: &str, body: &str) {
        std::fs::write(
            dir.join(format!("{slug}.mdx")),
            format!("---\n{frontmatter}---\n{body}\n"),
        )
        .unwrap();
    }

    fn corpus() -> (TempDir, PostStore) {
        let dir = TempDir::new().unwrap();
        write_post(
            dir.path(),
            "grace-in-code",
            "title: Grace in Code\ndate: \"2024-06-10\"\nauthor: Ana\ncategory: Faith\ntags: [prayer]\n",
            "Grace body.",
        );
        write_post(
            dir.path(),
            "prayer-app",
            "title: Building a Prayer App\ndate: \"2024-06-01\"\nauthor: Ana\ncategory: Faith\ntags: [Prayer]\n",
            "Prayer body.",
        );
        write_post(
            dir.path(),
            "hiring",
            "title: We Are Hiring\ndate: \"2023-01-15\"\nauthor: Cy\ncategory: Company\n",
            "Join us.",
        );
        let store = PostStore::new(dir.path());
        (dir, store)
    }

    #[tokio::test]
    async fn test_list() {
        let (_dir, store) = corpus();
        let out = list(&store, None).await.unwrap();
        let lines: Vec<_> = out.lines().collect();
        assert!(lines[0].contains("grace-in-code"));
        assert!(lines[0].contains("[Faith]"));
        assert!(lines[2].contains("hiring"));
        assert!(out.contains("3 post(s)"));
    }

    #[tokio::test]
    async fn test_list_category() {
        let (_dir, store) = corpus();
        let out = list(&store, Some("Company")).await.unwrap();
        assert!(out.contains("hiring"));
        assert!(!out.contains("grace-in-code"));
        assert!(out.contains("1 post(s)"));
    }

    #[tokio::test]
    async fn test_list_empty() {
        let dir = TempDir::new().unwrap();
        let store = PostStore::new(dir.path().join("missing"));
        assert_eq!(list(&store, None).await.unwrap(), "No posts found.\n");
    }

    #[tokio::test]
    async fn test_show() {
        let (_dir, store) = corpus();
        let out = show(&store, "prayer-app").await.unwrap();
        assert!(out.starts_with("Building a Prayer App\n"));
        assert!(out.contains("tags:      Prayer"));
        assert!(out.contains("read time: 1 min read"));
        assert!(out.trim_end().ends_with("Prayer body."));
    }

    #[tokio::test]
    async fn test_show_missing() {
        let (_dir, store) = corpus();
        let err = show(&store, "nope").await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_related_with_scores() {
        let (_dir, store) = corpus();
        let out = related(&store, "prayer-app", 1).await.unwrap();
        // category 10 + tag 5 + author 3 + date 2
        assert_eq!(out, "  20  grace-in-code  Grace in Code\n");
    }

    #[tokio::test]
    async fn test_related_missing() {
        let (_dir, store) = corpus();
        assert!(related(&store, "nope", 3).await.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn test_handle_posts_command() {
        let (_dir, store) = corpus();
        let action = PostsAction::List { category: None };
        assert!(handle_posts_command(&store, action).await.is_ok());
    }
}
