//! `catalog categories ...` and `catalog resources ...`.
//!
//! Each command shows the page, emits the same requests the modal and
//! table buttons would, then prints the resulting page state.

use anyhow::Result;
use catalog::model::{status_label, Category, CategoryDraft, Entity, Resource, ResourceDraft};
use catalog::request::{
    BeginEditReq, DeleteReq, ImportDefaultsReq, PageAction, SetCategoryFilterReq, SubmitReq,
};
use catalog::state::{CategoryFilter, ListState, Route};

use super::app::App;
use super::output::{cell, print_json, render_table, Output};

/// Fields settable from the command line; `None` leaves the draft as is.
#[derive(Debug, Default, Clone)]
pub struct CategoryFields {
    pub name: Option<String>,
    pub slug: Option<String>,
    pub active: Option<bool>,
}

impl CategoryFields {
    fn apply(self, draft: &mut CategoryDraft) {
        if let Some(v) = self.name {
            draft.name = v;
        }
        if let Some(v) = self.slug {
            draft.slug = v;
        }
        if let Some(v) = self.active {
            draft.is_active = v;
        }
    }
}

#[derive(Debug, Default, Clone)]
pub struct ResourceFields {
    pub title: Option<String>,
    pub author: Option<String>,
    pub platform: Option<String>,
    pub image: Option<String>,
    pub overview: Option<String>,
    pub category: Option<i64>,
    pub compatibility: Option<String>,
    pub description: Option<String>,
    pub download_link: Option<String>,
    pub active: Option<bool>,
}

impl ResourceFields {
    fn apply(self, draft: &mut ResourceDraft) {
        let text = [
            (self.title, &mut draft.title),
            (self.author, &mut draft.author),
            (self.platform, &mut draft.platform),
            (self.image, &mut draft.image),
            (self.overview, &mut draft.overview),
            (self.compatibility, &mut draft.compatibility),
            (self.description, &mut draft.description),
            (self.download_link, &mut draft.download_link),
        ];
        for (value, field) in text {
            if let Some(v) = value {
                *field = v;
            }
        }
        if let Some(id) = self.category {
            draft.category_id = Some(id);
        }
        if let Some(v) = self.active {
            draft.is_active = v;
        }
    }
}

// ========================================================================
// Shared flow
// ========================================================================

fn bail_on_error<E: Entity>(state: &ListState<E>) -> Result<()> {
    match &state.error {
        Some(error) => anyhow::bail!("{}", error),
        None => Ok(()),
    }
}

/// Open the modal (create or edit), let `edit` change the draft, submit.
async fn save<E: Entity>(
    app: &App,
    id: Option<i64>,
    edit: impl FnOnce(&mut E::Draft),
) -> Result<()> {
    match id {
        Some(id) => {
            app.flux
                .emit(&PageAction::Edit.path(E::SCOPE), BeginEditReq { id })
                .await;
            if app.page::<E>().edit_target != Some(id) {
                anyhow::bail!("{} {} not found.", E::LABEL, id);
            }
        }
        None => app.flux.emit(&PageAction::Create.path(E::SCOPE), ()).await,
    }

    let mut draft = app.page::<E>().draft;
    edit(&mut draft);
    app.flux
        .emit(&PageAction::Submit.path(E::SCOPE), SubmitReq(draft))
        .await;

    let state = app.page::<E>();
    bail_on_error(&state)?;
    let verb = if id.is_some() { "updated" } else { "created" };
    println!("{} {}.", E::LABEL, verb);
    Ok(())
}

async fn delete<E: Entity>(app: &App, id: i64) -> Result<()> {
    if app.page::<E>().find(id).is_none() {
        anyhow::bail!("{} {} not found.", E::LABEL, id);
    }
    app.flux
        .emit(&PageAction::Delete.path(E::SCOPE), DeleteReq { id })
        .await;

    let state = app.page::<E>();
    bail_on_error(&state)?;
    if state.find(id).is_some() {
        println!("Cancelled.");
    } else {
        println!("{} {} deleted.", E::LABEL, id);
    }
    Ok(())
}

// ========================================================================
// Categories
// ========================================================================

pub async fn list_categories(app: &App, keyword: Option<&str>, output: Output) -> Result<()> {
    app.show(Route::Categories, keyword).await?;
    bail_on_error(&app.page::<Category>())?;
    let rows = app.dash.categories.visible();
    match output {
        Output::Json => print_json(&rows),
        Output::Table => {
            println!("{}", category_table(&rows));
            Ok(())
        }
    }
}

fn category_table(rows: &[Category]) -> String {
    let cells: Vec<Vec<String>> = rows
        .iter()
        .map(|c| {
            vec![
                c.id.to_string(),
                cell(&c.name),
                cell(&c.slug),
                status_label(c.is_active).to_string(),
                cell(&c.created_at),
            ]
        })
        .collect();
    render_table(&["ID", "NAME", "SLUG", "STATUS", "CREATED"], &cells)
}

pub async fn add_category(app: &App, fields: CategoryFields) -> Result<()> {
    app.show(Route::Categories, None).await?;
    save::<Category>(app, None, |d| fields.apply(d)).await
}

pub async fn edit_category(app: &App, id: i64, fields: CategoryFields) -> Result<()> {
    app.show(Route::Categories, None).await?;
    save::<Category>(app, Some(id), |d| fields.apply(d)).await
}

pub async fn delete_category(app: &App, id: i64) -> Result<()> {
    app.show(Route::Categories, None).await?;
    delete::<Category>(app, id).await
}

pub async fn import_defaults(app: &App) -> Result<()> {
    app.show(Route::Categories, None).await?;
    let before = app.page::<Category>().items.len();
    app.flux.emit(ImportDefaultsReq::PATH, ImportDefaultsReq).await;
    let state = app.page::<Category>();
    bail_on_error(&state)?;
    println!("Imported {} categories.", state.items.len().saturating_sub(before));
    Ok(())
}

// ========================================================================
// Resources
// ========================================================================

pub async fn list_resources(
    app: &App,
    keyword: Option<&str>,
    category: Option<i64>,
    output: Output,
) -> Result<()> {
    app.show(Route::Resources, keyword).await?;
    let selected = category.map_or(CategoryFilter::All, CategoryFilter::Category);
    app.flux
        .emit(SetCategoryFilterReq::PATH, SetCategoryFilterReq(selected))
        .await;
    bail_on_error(&app.page::<Resource>())?;

    let rows = app.dash.resources.visible_resources();
    match output {
        Output::Json => print_json(&rows),
        Output::Table => {
            let cells: Vec<Vec<String>> = rows
                .iter()
                .map(|r| {
                    vec![
                        r.id.to_string(),
                        cell(&r.title),
                        cell(&r.author),
                        app.dash.resources.category_name(r),
                        cell(&r.platform),
                        r.image_cell().to_string(),
                        r.download_cell().to_string(),
                        status_label(r.is_active).to_string(),
                    ]
                })
                .collect();
            println!(
                "{}",
                render_table(
                    &[
                        "ID", "TITLE", "AUTHOR", "CATEGORY", "PLATFORM", "IMAGE", "DOWNLOAD",
                        "STATUS",
                    ],
                    &cells,
                )
            );
            Ok(())
        }
    }
}

pub async fn add_resource(app: &App, fields: ResourceFields) -> Result<()> {
    app.show(Route::Resources, None).await?;
    save::<Resource>(app, None, |d| fields.apply(d)).await
}

pub async fn edit_resource(app: &App, id: i64, fields: ResourceFields) -> Result<()> {
    app.show(Route::Resources, None).await?;
    save::<Resource>(app, Some(id), |d| fields.apply(d)).await
}

pub async fn delete_resource(app: &App, id: i64) -> Result<()> {
    app.show(Route::Resources, None).await?;
    delete::<Resource>(app, id).await
}
