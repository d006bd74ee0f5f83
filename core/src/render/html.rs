use std::borrow::Cow;

use itertools::Itertools;

use crate::{
    model::{capitalize, Asset, Category, CategoryFilter, UploadForm},
    navigation::NavLink,
};

pub const LOADING: &str = "<p class=\"status loading\">Loading...</p>";
pub const LOAD_ERROR: &str = "<p class=\"status error\">Failed to load assets from server.</p>";
pub const EMPTY: &str = "<p class=\"status empty\">No assets found.</p>";

/// Escapes `& < > " '`, safe for text content and quoted attribute values.
pub fn escape(s: &str) -> Cow<'_, str> {
    html_escape::encode_quoted_attribute(s)
}

/// The view an action should return to afterwards.
#[derive(Debug, Clone, Copy)]
pub struct ViewQuery<'a> {
    pub category: CategoryFilter,
    pub search: &'a str,
}

impl ViewQuery<'_> {
    fn hidden_inputs(&self) -> String {
        format!(
            r#"<input type="hidden" name="view_category" value="{}"><input type="hidden" name="view_search" value="{}">"#,
            escape(self.category.as_str()),
            escape(self.search)
        )
    }
}

pub fn asset_card(asset: &Asset, view: &ViewQuery) -> String {
    let id = escape(&asset.id.0);
    let name = escape(&asset.name);
    let uploader = escape(&asset.uploader);
    format!(
        r#"<div class="asset-card" data-id="{id}">
  <div class="asset-category">{category}</div>
  <h3 title="{name}">{name}</h3>
  <div class="asset-uploader" title="Uploaded by {uploader}">By: {uploader}</div>
  <div class="asset-actions">
    <a class="button download" href="{link}" target="_blank" rel="noopener noreferrer">Download</a>
    <form class="delete-form" method="post" action="/assets/{id}/delete">
      <input type="hidden" name="uploader" value="{uploader}">{hidden}
      <input name="confirm_name" placeholder="Type your uploader name to confirm" autocomplete="off">
      <label><input type="checkbox" name="confirmed" value="true"> I am sure</label>
      <button type="submit">Delete</button>
    </form>
  </div>
</div>"#,
        category = escape(&capitalize(&asset.category)),
        link = escape(&asset.link),
        hidden = view.hidden_inputs(),
    )
}

pub fn asset_list(assets: &[Asset], view: &ViewQuery) -> String {
    if assets.is_empty() {
        return EMPTY.to_owned();
    }
    assets.iter().map(|asset| asset_card(asset, view)).join("\n")
}

pub fn nav_bar(links: &[NavLink]) -> String {
    let items = links
        .iter()
        .map(|link| {
            format!(
                r#"<a class="category-btn{}" href="{}">{}</a>"#,
                if link.is_active { " active" } else { "" },
                escape(&link.href),
                escape(&link.label)
            )
        })
        .join("");
    format!("<nav class=\"categories\">{}</nav>", items)
}

fn notice_list(notices: &[String]) -> String {
    if notices.is_empty() {
        return String::new();
    }
    let items = notices
        .iter()
        .map(|n| format!("<li>{}</li>", escape(n)))
        .join("");
    format!("<ul class=\"notices\" role=\"alert\">{}</ul>", items)
}

fn upload_form(form: &UploadForm, view: &ViewQuery) -> String {
    let options = Category::all()
        .map(|category| {
            let value = category.as_ref();
            format!(
                r#"<option value="{}"{}>{}</option>"#,
                value,
                if form.category == value { " selected" } else { "" },
                capitalize(value)
            )
        })
        .join("");
    format!(
        r#"<details class="upload-modal"{open}>
  <summary>Upload asset</summary>
  <form method="post" action="/upload">{hidden}
    <input name="name" placeholder="Asset name" value="{name}">
    <select name="category">{options}</select>
    <input name="link" placeholder="Download link" value="{link}">
    <input name="uploader" placeholder="Your name" value="{uploader}">
    <button type="submit">Upload</button>
  </form>
</details>"#,
        open = if form.is_open { " open" } else { "" },
        hidden = view.hidden_inputs(),
        name = escape(&form.name),
        link = escape(&form.link),
        uploader = escape(&form.uploader),
    )
}

pub struct PageView<'a> {
    pub links: &'a [NavLink],
    pub view: ViewQuery<'a>,
    pub upload_form: &'a UploadForm,
    pub notices: &'a [String],
    /// Already rendered contents of the asset region.
    pub assets: &'a str,
}

pub fn page(page: &PageView) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>Asset Gallery</title>
</head>
<body>
<header>
{nav}
<form class="search" method="get" action="/">
  <input type="hidden" name="category" value="{category}">
  <input id="search" type="search" name="search" placeholder="Search assets" value="{search}">
</form>
</header>
{notices}
{upload}
<main id="assets">
{assets}
</main>
</body>
</html>
"#,
        nav = nav_bar(page.links),
        category = escape(page.view.category.as_str()),
        search = escape(page.view.search),
        notices = notice_list(page.notices),
        upload = upload_form(page.upload_form, &page.view),
        assets = page.assets,
    )
}
