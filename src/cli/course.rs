//! Course commands (list, show, check) and their text rendering

use std::io::{self, Write};

use anyhow::{Context, Result};

use super::app::Settings;
use super::output::Output;
use crate::domain::{Catalog, Course};

/// Loads the catalog named by the settings
fn load(output: &Output, settings: &Settings) -> Result<Catalog> {
    output.verbose_ctx(
        "load",
        &format!(
            "Loading catalog: {} (duplicates: {})",
            settings.catalog.display(),
            settings.duplicates.as_str()
        ),
    );

    let catalog = settings
        .loader()
        .load(&settings.catalog)
        .with_context(|| format!("Failed to load catalog {}", settings.catalog.display()))?;

    output.verbose_ctx(
        "load",
        &format!(
            "{} courses read, tree height {}",
            catalog.records_read(),
            catalog.courses().height()
        ),
    );
    Ok(catalog)
}

/// Writes every course as `ID: Title`, in course number order
pub fn write_listing<W: Write>(out: &mut W, catalog: &Catalog) -> io::Result<()> {
    writeln!(out, "List of Courses (Alphanumeric Order):")?;
    for course in catalog.courses() {
        writeln!(out, "{}", course)?;
    }
    Ok(())
}

/// Writes one course with its prerequisites resolved through the catalog
pub fn write_course<W: Write>(
    out: &mut W,
    catalog: &Catalog,
    course: Option<&Course>,
) -> io::Result<()> {
    let Some(course) = course else {
        return writeln!(out, "Course not found.");
    };

    writeln!(out, "{}", course)?;
    if !course.has_prerequisites() {
        return writeln!(out, "Prerequisites: None");
    }

    let prerequisites: Vec<String> = catalog
        .prerequisites_of(course)
        .map(|p| match p.title() {
            Some(title) => format!("{} ({})", p.id, title),
            None => format!("{} (Title not found)", p.id),
        })
        .collect();

    writeln!(out, "Prerequisites: {}", prerequisites.join(", "))
}

/// JSON shape for a course, with prerequisite titles resolved
pub fn course_json(catalog: &Catalog, course: &Course) -> serde_json::Value {
    let prerequisites: Vec<_> = catalog
        .prerequisites_of(course)
        .map(|p| {
            serde_json::json!({
                "id": p.id,
                "title": p.title(),
            })
        })
        .collect();

    serde_json::json!({
        "id": course.id,
        "title": course.title,
        "prerequisites": prerequisites,
    })
}

/// List all courses
pub fn list(output: &Output, settings: &Settings) -> Result<()> {
    let catalog = load(output, settings)?;

    if output.is_json() {
        let mut items = Vec::with_capacity(catalog.len());
        catalog
            .courses()
            .in_order(|course| items.push(course_json(&catalog, course)));
        output.data(&items);
    } else {
        let stdout = io::stdout();
        write_listing(&mut stdout.lock(), &catalog)?;
    }

    Ok(())
}

/// Show a single course
pub fn show(output: &Output, settings: &Settings, id: &str) -> Result<()> {
    let catalog = load(output, settings)?;
    output.verbose_ctx("show", &format!("Searching for: {}", id));

    let course = catalog
        .find(id)
        .ok_or_else(|| anyhow::anyhow!("Course not found: {}", id))?;

    if output.is_json() {
        output.data(&course_json(&catalog, course));
    } else {
        let stdout = io::stdout();
        write_course(&mut stdout.lock(), &catalog, Some(course))?;
    }

    Ok(())
}

/// Report dangling prerequisites and repeated course numbers
pub fn check(output: &Output, settings: &Settings) -> Result<()> {
    let catalog = load(output, settings)?;
    catalog
        .courses()
        .check_invariants()
        .context("Catalog tree is inconsistent")?;

    let dangling = catalog.dangling_prerequisites();
    let duplicates = catalog.duplicate_ids();
    output.verbose_ctx(
        "check",
        &format!(
            "{} dangling prerequisites, {} duplicate course numbers",
            dangling.len(),
            duplicates.len()
        ),
    );

    if output.is_json() {
        let dangling: Vec<_> = dangling
            .iter()
            .map(|(course, missing)| {
                serde_json::json!({
                    "course": course.id,
                    "prerequisite": missing,
                })
            })
            .collect();

        output.data(&serde_json::json!({
            "catalog": settings.catalog.display().to_string(),
            "courses": catalog.len(),
            "records_read": catalog.records_read(),
            "height": catalog.courses().height(),
            "duplicates": duplicates,
            "dangling": dangling,
        }));
        return Ok(());
    }

    println!("Catalog: {}", settings.catalog.display());
    println!(
        "Courses: {} ({} records read)",
        catalog.len(),
        catalog.records_read()
    );
    println!("Tree height: {}", catalog.courses().height());
    println!();

    if duplicates.is_empty() {
        println!("Duplicate course numbers: none");
    } else {
        println!("Duplicate course numbers: {}", duplicates.join(", "));
    }

    if dangling.is_empty() {
        println!("Dangling prerequisites: none");
    } else {
        println!("Dangling prerequisites ({}):", dangling.len());
        println!("{:<12} MISSING", "COURSE");
        println!("{}", "-".repeat(30));
        for (course, missing) in &dangling {
            println!("{:<12} {}", course.id, missing);
        }
    }

    if duplicates.is_empty() && dangling.is_empty() {
        println!();
        output.success("Catalog is consistent");
    }

    Ok(())
}
