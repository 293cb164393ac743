use crate::commands::{print_json, Context};
use crate::error::invalid_input;
use crate::util::{normalize_optional_value, parse_contact_id};
use anyhow::Result;
use clap::Args;
use phonebank_core::{Contact, ContactDraft, ContactPatch};

#[derive(Debug, Args)]
pub struct AddContactArgs {
    #[arg(long)]
    pub first_name: Option<String>,
    #[arg(long)]
    pub last_name: Option<String>,
    #[arg(long)]
    pub email: Option<String>,
    #[arg(long)]
    pub phone: Option<String>,
    #[arg(long)]
    pub status: Option<String>,
    #[arg(long)]
    pub comment: Option<String>,
    #[arg(long)]
    pub source: Option<String>,
}

#[derive(Debug, Args)]
pub struct EditContactArgs {
    pub id: String,
    #[arg(long)]
    pub first_name: Option<String>,
    #[arg(long)]
    pub last_name: Option<String>,
    #[arg(long)]
    pub email: Option<String>,
    #[arg(long)]
    pub phone: Option<String>,
    #[arg(long)]
    pub status: Option<String>,
    #[arg(long)]
    pub comment: Option<String>,
    #[arg(long)]
    pub date_rappel: Option<String>,
    #[arg(long)]
    pub heure_rappel: Option<String>,
    #[arg(long)]
    pub date_rendez_vous: Option<String>,
    #[arg(long)]
    pub heure_rendez_vous: Option<String>,
    #[arg(long)]
    pub date_appel: Option<String>,
    #[arg(long)]
    pub heure_appel: Option<String>,
    #[arg(long)]
    pub duree_appel: Option<String>,
    #[arg(long)]
    pub call_start_time: Option<String>,
    #[arg(long)]
    pub source: Option<String>,
}

#[derive(Debug, Args)]
pub struct ShowArgs {
    pub id: String,
}

#[derive(Debug, Args)]
pub struct ListArgs {}

#[derive(Debug, Args)]
pub struct DeleteArgs {
    pub id: String,
}

#[derive(Debug, Args)]
pub struct DeleteAllArgs {
    /// Required confirmation; the command refuses to run without it.
    #[arg(long)]
    pub yes: bool,
}

pub fn add_contact(ctx: &Context, args: AddContactArgs) -> Result<()> {
    let draft = ContactDraft {
        first_name: args.first_name,
        last_name: args.last_name,
        email: args.email,
        phone_number: args.phone,
        status: args.status,
        comment: args.comment,
        source: args.source,
        ..Default::default()
    };

    let contact = ctx.store.create(draft)?;
    if ctx.json {
        print_json(&contact)?;
    } else {
        println!("created {} {}", contact.id, display_name(&contact));
    }
    Ok(())
}

pub fn edit_contact(ctx: &Context, args: EditContactArgs) -> Result<()> {
    let id = parse_contact_id(&args.id)?;

    let patch = ContactPatch {
        first_name: args.first_name.map(normalize_optional_value),
        last_name: args.last_name.map(normalize_optional_value),
        email: args.email.map(normalize_optional_value),
        phone_number: args.phone.map(normalize_optional_value),
        status: args.status.map(normalize_optional_value),
        comment: args.comment.map(normalize_optional_value),
        date_rappel: args.date_rappel.map(normalize_optional_value),
        heure_rappel: args.heure_rappel.map(normalize_optional_value),
        date_rendez_vous: args.date_rendez_vous.map(normalize_optional_value),
        heure_rendez_vous: args.heure_rendez_vous.map(normalize_optional_value),
        date_appel: args.date_appel.map(normalize_optional_value),
        heure_appel: args.heure_appel.map(normalize_optional_value),
        duree_appel: args.duree_appel.map(normalize_optional_value),
        call_start_time: args.call_start_time.map(normalize_optional_value),
        source: args.source.map(normalize_optional_value),
        ..Default::default()
    };

    if patch.is_empty() {
        return Err(invalid_input("no updates provided"));
    }

    let contact = ctx.store.update(id, patch)?;
    if ctx.json {
        print_json(&contact)?;
    } else {
        println!("updated {} {}", contact.id, display_name(&contact));
    }
    Ok(())
}

pub fn show_contact(ctx: &Context, args: ShowArgs) -> Result<()> {
    let id = parse_contact_id(&args.id)?;
    let contact = ctx
        .store
        .get(id)
        .ok_or_else(|| crate::error::not_found("contact not found"))?;

    if ctx.json {
        return print_json(&contact);
    }

    println!("{} {}", contact.id, display_name(&contact));
    if let Some(email) = &contact.email {
        println!("  email: {}", email);
    }
    if let Some(phone) = &contact.phone_number {
        println!("  phone: {}", phone);
    }
    if let Some(status) = &contact.status {
        println!("  status: {}", status);
    }
    if let Some(comment) = &contact.comment {
        println!("  comment: {}", comment);
    }
    if let (Some(date), Some(time)) = (&contact.date_appel, &contact.heure_appel) {
        println!("  last call: {} {}", date, time);
    }
    if let Some(duration) = &contact.duree_appel {
        println!("  call duration: {}", duration);
    }
    if let Some(source) = &contact.source {
        println!("  source: {}", source);
    }
    Ok(())
}

pub fn list_contacts(ctx: &Context, _args: ListArgs) -> Result<()> {
    let contacts = ctx.store.list_all();

    if ctx.json {
        return print_json(&contacts);
    }

    for contact in &contacts {
        println!(
            "{}  {:<30} {:<25} {}",
            contact.id,
            display_name(contact),
            contact.phone_number.as_deref().unwrap_or("-"),
            contact.status.as_deref().unwrap_or("-"),
        );
    }
    if contacts.is_empty() {
        println!("no contacts");
    }
    Ok(())
}

pub fn delete_contact(ctx: &Context, args: DeleteArgs) -> Result<()> {
    let id = parse_contact_id(&args.id)?;
    ctx.store.delete(id)?;
    if ctx.json {
        print_json(&serde_json::json!({ "deleted": id }))?;
    } else {
        println!("deleted {}", id);
    }
    Ok(())
}

pub fn delete_all_contacts(ctx: &Context, args: DeleteAllArgs) -> Result<()> {
    if !args.yes {
        return Err(invalid_input("pass --yes to delete every contact"));
    }
    ctx.store.delete_all()?;
    if ctx.json {
        print_json(&serde_json::json!({ "deleted": "all" }))?;
    } else {
        println!("all contacts deleted");
    }
    Ok(())
}

fn display_name(contact: &Contact) -> String {
    let first = contact.first_name.as_deref().unwrap_or("");
    let last = contact.last_name.as_deref().unwrap_or("");
    let name = format!("{} {}", first, last);
    let name = name.trim();
    if name.is_empty() {
        "(unnamed)".to_string()
    } else {
        name.to_string()
    }
}
