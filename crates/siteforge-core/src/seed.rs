//! Starter template seeding
//!
//! Produces the initial file set for a freshly created repository. The
//! seeder is pure and byte-deterministic: identical inputs always yield
//! identical output, so the orchestrator can re-run the whole upsert pass
//! after a transient failure without drift.

use crate::error::{CoreError, Result};
use serde::{Deserialize, Serialize};
use tera::{Context, Tera};

/// One seeded file, ready for a repository upsert
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeedFile {
    pub path: String,
    pub content: String,
}

const SITE_CONFIG: &str = r#"baseURL = 'https://{{ staging_domain }}'
languageCode = 'en-us'
title = '{{ client_name }}'
theme = 'client-theme'

[markup]
  [markup.goldmark]
    [markup.goldmark.renderer]
      unsafe = true
"#;

const HOME_PAGE: &str = r#"---
title: "Welcome to {{ client_name }}"
description: "Professional website for {{ client_name }}"
---

# Welcome to {{ client_name }}

This is your professional website. You can edit this content through your
admin panel at [/admin/](/admin/).

## About Us

Tell your story here.

## Our Services

- Service 1: Description
- Service 2: Description
- Service 3: Description

## Contact Us

Get in touch today!
"#;

const ADMIN_ENTRY: &str = r#"<!DOCTYPE html>
<html>
<head>
  <meta charset="utf-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>Content Manager</title>
</head>
<body>
  <script src="https://unpkg.com/decap-cms@^3.0.0/dist/decap-cms.js"></script>
  <script>
    CMS.init({
      config: {
        backend: {
          name: 'github',
          repo: '{{ repository_slug }}',
          branch: 'main'
        },
        media_folder: 'static/images',
        public_folder: '/images',
        collections: [
          {
            name: 'pages',
            label: 'Pages',
            files: [
              {
                label: 'Home Page',
                name: 'home',
                file: 'content/_index.md',
                fields: [
                  { label: 'Title', name: 'title', widget: 'string' },
                  { label: 'Description', name: 'description', widget: 'string' },
                  { label: 'Body', name: 'body', widget: 'markdown' }
                ]
              }
            ]
          }
        ]
      }
    });
  </script>
</body>
</html>
"#;

// The theme layouts carry Hugo's own template syntax, so they are emitted
// verbatim rather than passed through the renderer.
const LAYOUT_BASEOF: &str = r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{{ .Title }} - {{ .Site.Title }}</title>
    <style>
        body { font-family: -apple-system, BlinkMacSystemFont, sans-serif; line-height: 1.6; margin: 0 auto; padding: 20px; max-width: 800px; }
        h1, h2, h3 { color: #333; }
        a { color: #0066cc; }
    </style>
</head>
<body>
    {{ block "main" . }}{{ end }}
</body>
</html>
"#;

const LAYOUT_SINGLE: &str = r#"{{ define "main" }}
<article>
    <h1>{{ .Title }}</h1>
    <div>{{ .Content }}</div>
</article>
{{ end }}
"#;

const LAYOUT_INDEX: &str = r#"{{ define "main" }}
<div>{{ .Content }}</div>
{{ end }}
"#;

const REDIRECTS: &str = "/admin/* /admin/index.html 200\n";

/// Produce the ordered starter file set for a new site.
///
/// The staging hostname referenced by the site config is the one the
/// hosting provider will assign for a project named after the slug.
pub fn seed(repository_slug: &str, client_name: &str) -> Result<Vec<SeedFile>> {
    let mut context = Context::new();
    context.insert("repository_slug", repository_slug);
    context.insert("client_name", client_name);
    context.insert("staging_domain", &format!("{repository_slug}.pages.dev"));

    let mut tera = Tera::default();
    let mut render = |template: &str| -> Result<String> {
        tera.render_str(template, &context)
            .map_err(|e| CoreError::TemplateRender(e.to_string()))
    };

    Ok(vec![
        SeedFile {
            path: "hugo.toml".into(),
            content: render(SITE_CONFIG)?,
        },
        SeedFile {
            path: "content/_index.md".into(),
            content: render(HOME_PAGE)?,
        },
        SeedFile {
            path: "static/admin/index.html".into(),
            content: render(ADMIN_ENTRY)?,
        },
        SeedFile {
            path: "themes/client-theme/layouts/_default/baseof.html".into(),
            content: LAYOUT_BASEOF.into(),
        },
        SeedFile {
            path: "themes/client-theme/layouts/_default/single.html".into(),
            content: LAYOUT_SINGLE.into(),
        },
        SeedFile {
            path: "themes/client-theme/layouts/index.html".into(),
            content: LAYOUT_INDEX.into(),
        },
        SeedFile {
            path: "_redirects".into(),
            content: REDIRECTS.into(),
        },
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_is_deterministic() {
        let a = seed("sf-client-acme-corp", "Acme Corp").unwrap();
        let b = seed("sf-client-acme-corp", "Acme Corp").unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_site_config_references_staging_domain_and_title() {
        let files = seed("sf-client-acme-corp", "Acme Corp").unwrap();
        let config = &files[0];
        assert_eq!(config.path, "hugo.toml");
        assert!(config.content.contains("baseURL = 'https://sf-client-acme-corp.pages.dev'"));
        assert!(config.content.contains("title = 'Acme Corp'"));
    }

    #[test]
    fn test_admin_entry_points_at_slug() {
        let files = seed("sf-client-acme-corp", "Acme Corp").unwrap();
        let admin = files
            .iter()
            .find(|f| f.path == "static/admin/index.html")
            .unwrap();
        assert!(admin.content.contains("repo: 'sf-client-acme-corp'"));
        assert!(admin.content.contains("branch: 'main'"));
    }

    #[test]
    fn test_redirect_rule_routes_admin() {
        let files = seed("sf-client-acme-corp", "Acme Corp").unwrap();
        let redirects = files.iter().find(|f| f.path == "_redirects").unwrap();
        assert_eq!(redirects.content, "/admin/* /admin/index.html 200\n");
    }

    #[test]
    fn test_layouts_keep_hugo_syntax() {
        let files = seed("sf-client-acme-corp", "Acme Corp").unwrap();
        let baseof = files
            .iter()
            .find(|f| f.path.ends_with("baseof.html"))
            .unwrap();
        assert!(baseof.content.contains(r#"{{ block "main" . }}{{ end }}"#));
    }

    #[test]
    fn test_order_is_stable() {
        let files = seed("sf-client-x", "X").unwrap();
        let paths: Vec<&str> = files.iter().map(|f| f.path.as_str()).collect();
        assert_eq!(paths[0], "hugo.toml");
        assert_eq!(paths[1], "content/_index.md");
        assert_eq!(*paths.last().unwrap(), "_redirects");
    }
}
