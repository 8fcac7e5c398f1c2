#![allow(dead_code)]

use std::fs;
use std::path::Path;

use git2::{IndexAddOption, Repository};

pub const SCHEMES: &str = r#"
default: dev
schemes:
  base:
    replacements:
      APP_ID: com.example.app
      APP_NAME: Example
      API_URL: https://api.example.com
      CONTENT_SECURITY_POLICY:
        img_src: ["'self'", "data:"]
        default_src: ["'self'"]
        connect_src: []
  dev:
    base: base
    debug: true
    replacements:
      API_URL: http://localhost:8100
  prod:
    base: base
    replacements:
      APP_NAME: Example Pro
overrides:
  device:
    API_URL: http://192.168.0.10:8100
"#;

pub const RESOURCES: &str = r#"
css:
  - css/ionic.app.css
lib:
  - lib/ionic/js/ionic.bundle.js
  - https://maps.example.com/api.js
js:
  - js/app.js
"#;

pub const INDEX_MASTER: &str = r#"<html>
<head>
  <meta http-equiv="Content-Security-Policy" content="${CONTENT_SECURITY_POLICY}">
  <title>${APP_NAME}</title>
  <!-- references:css -->
</head>
<body>
  <!-- references:lib -->
  <!-- references:js -->
</body>
</html>
"#;

pub const CONFIG_MASTER: &str =
    "<widget id=\"${APP_ID}\"><name>${APP_NAME}</name><pref value=\"${UNSET}\"/></widget>\n";

pub const MANIFEST_MASTER: &str = "{\"name\": \"${APP_NAME}\"}\n";

/// Lay out a project with the default schemer file locations.
pub fn write_project(root: &Path) {
    write(root, "schemes.yml", SCHEMES);
    write(root, "resources.yml", RESOURCES);
    write(root, "www/index.master.html", INDEX_MASTER);
    write(root, "config.master.xml", CONFIG_MASTER);
    write(root, "www/manifest.master.json", MANIFEST_MASTER);
}

pub fn write(root: &Path, relative: &str, content: &str) {
    let path = root.join(relative);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, content).unwrap();
}

pub fn read(root: &Path, relative: &str) -> String {
    fs::read_to_string(root.join(relative)).unwrap()
}

pub fn commit_all(repo: &Repository, message: &str) -> git2::Oid {
    let mut index = repo.index().unwrap();
    index
        .add_all(["*"].iter(), IndexAddOption::DEFAULT, None)
        .unwrap();
    index.write().unwrap();
    let tree_id = index.write_tree().unwrap();
    let tree = repo.find_tree(tree_id).unwrap();

    let sig = git2::Signature::now("schemer", "schemer@example.com").unwrap();
    let head = repo.head();

    match head {
        Ok(head) => {
            let parent = repo.find_commit(head.target().unwrap()).unwrap();
            repo.commit(Some("HEAD"), &sig, &sig, message, &tree, &[&parent])
                .unwrap()
        }
        Err(_) => repo
            .commit(Some("HEAD"), &sig, &sig, message, &tree, &[])
            .unwrap(),
    }
}
