use crate::commands::{print_json, Context};
use crate::util::{display_offset, parse_contact_id};
use anyhow::Result;
use clap::{Args, Subcommand};
use phonebank_call::{AdbController, CallSessionTracker};
use std::time::Duration;

#[derive(Debug, Args)]
pub struct CallArgs {
    /// Number to dial, in any accepted form.
    pub number: String,
    /// Contact to stamp with the call start.
    #[arg(long)]
    pub id: Option<String>,
}

#[derive(Debug, Args)]
pub struct EndCallArgs {
    #[arg(long)]
    pub id: Option<String>,
    /// Call start instant as reported by the caller.
    #[arg(long)]
    pub start: Option<String>,
    /// Caller-measured duration in seconds; authoritative when non-negative.
    #[arg(long)]
    pub duration: Option<i64>,
}

#[derive(Debug, Args)]
pub struct HangUpArgs {
    #[arg(long)]
    pub id: Option<String>,
}

#[derive(Debug, Args)]
pub struct CallStatusArgs {}

#[derive(Debug, Subcommand)]
pub enum DeviceCommand {
    /// List connected devices.
    Ls,
    /// Report the device battery level.
    Battery,
}

fn controller(ctx: &Context) -> AdbController {
    let device = &ctx.config.device;
    AdbController::new(device.tool_path.clone()).with_timeouts(
        Duration::from_secs(device.command_timeout_secs),
        Duration::from_secs(device.verify_timeout_secs),
        Duration::from_secs(device.key_timeout_secs),
    )
}

fn tracker(ctx: &Context) -> CallSessionTracker<AdbController> {
    CallSessionTracker::new(
        controller(ctx),
        ctx.store.clone(),
        display_offset(ctx.config.display_offset_minutes),
    )
}

pub async fn start_call(ctx: &Context, args: CallArgs) -> Result<()> {
    let contact_id = args.id.as_deref().map(parse_contact_id).transpose()?;
    let started = tracker(ctx).start_call(&args.number, contact_id).await?;

    if ctx.json {
        print_json(&started)?;
    } else {
        println!("calling {}", started.phone_number);
    }
    Ok(())
}

pub async fn end_call(ctx: &Context, args: EndCallArgs) -> Result<()> {
    let contact_id = args.id.as_deref().map(parse_contact_id).transpose()?;
    let ended = tracker(ctx)
        .end_call(contact_id, args.start.as_deref(), args.duration)
        .await?;

    if ctx.json {
        print_json(&ended)?;
    } else {
        println!("call ended, duration {}", ended.duration);
    }
    Ok(())
}

pub async fn hang_up(ctx: &Context, args: HangUpArgs) -> Result<()> {
    let contact_id = args.id.as_deref().map(parse_contact_id).transpose()?;
    let outcome = tracker(ctx).hang_up(contact_id).await?;

    if ctx.json {
        print_json(&outcome)?;
    } else if let Some(contact) = &outcome.contact {
        println!(
            "hung up; call recorded on contact {} ({})",
            contact.id,
            contact.duree_appel.as_deref().unwrap_or("--:--")
        );
    } else {
        println!("hung up");
    }
    Ok(())
}

pub async fn call_status(ctx: &Context, _args: CallStatusArgs) -> Result<()> {
    let status = tracker(ctx).call_status().await?;

    if ctx.json {
        print_json(&status)?;
    } else if status.in_progress {
        println!("call in progress");
    } else {
        println!("idle");
    }
    Ok(())
}

pub async fn device(ctx: &Context, command: DeviceCommand) -> Result<()> {
    let controller = controller(ctx);
    match command {
        DeviceCommand::Ls => {
            let devices = controller.list_devices().await?;
            if ctx.json {
                print_json(&devices)?;
            } else if devices.is_empty() {
                println!("no devices attached");
            } else {
                for entry in devices {
                    println!("{}\t{}", entry.serial, entry.state);
                }
            }
        }
        DeviceCommand::Battery => {
            let level = controller.battery_level().await?;
            if ctx.json {
                print_json(&serde_json::json!({ "battery_level": level }))?;
            } else {
                println!("battery {}%", level);
            }
        }
    }
    Ok(())
}
