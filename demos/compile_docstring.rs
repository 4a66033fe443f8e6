use toolspec::prelude::*;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let doc = "\
Creates a calendar event.

Args:
    title (str): Event title.
    attendees (list, optional): Email addresses to invite.
    config (dict): Scheduling options.
        - start (str): ISO start timestamp.
        - reminder (dict, optional): Reminder settings.
            - minutes_before (int): Lead time.
            - channel (str, optional): Delivery channel.

Returns:
    str: The created event id.
";

    let container = compile(doc, "create_event")?;
    let value = serde_json::to_value(&container)?;
    validate_container(&value).map_err(Error::from)?;

    println!("{}", serde_json::to_string_pretty(&value)?);
    Ok(())
}
