use argparse::{ArgumentParser, Store, StoreTrue};
use os1::{Client, NotificationBuilder, SegmentNotificationBuilder};

// An example client sending a notification to a subscriber segment,
// fetching its delivery details and optionally cancelling it again.
#[tokio::main]
async fn main() -> Result<(), os1::Error> {
    tracing_subscriber::fmt::init();

    let mut app_id = String::new();
    let mut rest_api_key = String::new();
    let mut message = String::from("Ch-check it out!");
    let mut segment = String::from("Subscribed Users");
    let mut cancel = false;

    {
        let mut ap = ArgumentParser::new();
        ap.set_description("OneSignal segment push");
        ap.refer(&mut app_id)
            .add_option(&["-a", "--app_id"], Store, "OneSignal app id");
        ap.refer(&mut rest_api_key)
            .add_option(&["-k", "--rest_api_key"], Store, "OneSignal REST API key");
        ap.refer(&mut message)
            .add_option(&["-m", "--message"], Store, "Notification message");
        ap.refer(&mut segment)
            .add_option(&["-s", "--segment"], Store, "Target segment");
        ap.refer(&mut cancel)
            .add_option(&["-c", "--cancel"], StoreTrue, "Cancel the notification right away");
        ap.parse_args_or_exit();
    }

    let client = Client::new(app_id.as_str(), rest_api_key.as_str(), None);

    let notification = SegmentNotificationBuilder::new(&message, &[segment.as_str()])
        .set_heading("en", "os1 example")
        .build();

    let result = client.send(&notification).await?;
    println!("Sent: {:?}", result);

    if let Some(id) = result.notification_id() {
        let details = client.details(id).await?;
        println!("Details: {:?}", details);

        if cancel {
            let cancelled = client.cancel(id).await?;
            println!("Cancelled: {:?}", cancelled);
        }
    }

    Ok(())
}
