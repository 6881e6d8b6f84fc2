//! Initialize a new site

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

use crate::CONFIG_FILE;

const DEFAULT_CONFIG: &str = r#"# Site
title: My Site
author: John Doe
description: ''
language: en

# URL
url: http://localhost:4000
root: /

# Directory
content_dir: content/blog
public_dir: public
static_dir: static
blog_dir: blog

# Home page links
links:
  - name: GitHub
    url: https://github.com/

# Appearance
theme:
  default: light

highlight:
  theme: base16-ocean.dark
  line_number: false
  copy_button: true
"#;

/// Initialize a new site in the given directory
///
/// An existing configuration file is left untouched.
pub fn init_site(target_dir: &Path) -> Result<()> {
    fs::create_dir_all(target_dir.join("content/blog"))?;
    fs::create_dir_all(target_dir.join("static"))?;

    let config_path = target_dir.join(CONFIG_FILE);
    if config_path.exists() {
        anyhow::bail!("{:?} already exists", config_path);
    }
    fs::write(&config_path, DEFAULT_CONFIG)
        .with_context(|| format!("Failed to write {:?}", config_path))?;

    let sample_post = format!(
        r#"---
title: Hello World
description: The first post on this site
pubDate: {}
---

Welcome! This is your very first post. Edit or delete it, then start writing.

## Quick Start

### Create a new post

```bash
$ folio new "My New Post"
```

### Run server

```bash
$ folio server
```

### Generate static files

```bash
$ folio generate
```
"#,
        chrono::Local::now().format("%Y-%m-%d")
    );

    fs::write(target_dir.join("content/blog/hello-world.md"), sample_post)?;

    Ok(())
}
