use super::handlers::{admin, health};
use crate::admin::{AdminProfile, AdminSummary, CreatedAdmin, ErrorBody, Role};
use utoipa::{
    openapi::{Contact, InfoBuilder, License, OpenApiBuilder},
    OpenApi,
};

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health,
        admin::create::create_admin,
        admin::login::login,
        admin::reset::reset_password,
        admin::lookup::lookup_admin,
    ),
    components(schemas(
        health::Health,
        admin::types::CreateAdminRequest,
        admin::types::LoginRequest,
        admin::types::ResetPasswordRequest,
        admin::types::ResetPasswordResponse,
        CreatedAdmin,
        AdminProfile,
        AdminSummary,
        ErrorBody,
        Role,
    )),
    tags(
        (name = "admin", description = "Bootstrap-protected admin account management"),
        (name = "auth", description = "Admin login"),
        (name = "health", description = "Service and database health"),
    )
)]
struct ApiDoc;

/// Generated `OpenAPI` document with info taken from Cargo metadata.
#[must_use]
pub fn openapi() -> utoipa::openapi::OpenApi {
    let mut doc = ApiDoc::openapi();
    doc.info = cargo_openapi().info;
    doc
}

fn cargo_openapi() -> utoipa::openapi::OpenApi {
    // Use Cargo.toml metadata instead of the derive defaults.
    let mut info = InfoBuilder::new()
        .title(env!("CARGO_PKG_NAME"))
        .version(env!("CARGO_PKG_VERSION"))
        .description(optional_str(env!("CARGO_PKG_DESCRIPTION")))
        .build();

    info.contact = cargo_contact();
    info.license = cargo_license();

    OpenApiBuilder::new().info(info).build()
}

fn cargo_contact() -> Option<Contact> {
    // Cargo authors are `;` separated and may include "Name <email>".
    let authors = env!("CARGO_PKG_AUTHORS");
    let primary = authors.split(';').next().map(str::trim)?;
    if primary.is_empty() {
        return None;
    }

    let (name, email) = parse_author(primary);
    if name.is_none() && email.is_none() {
        return None;
    }

    let mut contact = Contact::new();
    contact.name = name.map(str::to_string);
    contact.email = email.map(str::to_string);
    Some(contact)
}

fn cargo_license() -> Option<License> {
    let identifier = optional_str(env!("CARGO_PKG_LICENSE"))?;
    let mut license = License::new(identifier);
    license.identifier = Some(identifier.to_string());
    Some(license)
}

fn optional_str(value: &'static str) -> Option<&'static str> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed)
    }
}

fn parse_author(author: &str) -> (Option<&str>, Option<&str>) {
    if let Some(start) = author.find('<') {
        let name = author[..start].trim();
        let email = author[start + 1..].trim_end_matches('>').trim();
        let name = if name.is_empty() { None } else { Some(name) };
        let email = if email.is_empty() { None } else { Some(email) };
        (name, email)
    } else {
        let name = author.trim();
        (if name.is_empty() { None } else { Some(name) }, None)
    }
}
