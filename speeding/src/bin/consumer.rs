use clap::Parser;
use lambda_runtime::{service_fn, LambdaEvent};
use log::{debug, error, info};

use speeding::consumer::{self, KinesisBatch, StdoutSink};
use speeding::logger::{self, Level};
use speeding::BANNER;

pub const LOG: &str = "speeding-consumer";

const INFO: &str = "
Lambda handler decoding Kinesis records delivered by an event
source mapping and writing them to the log.";

#[derive(Debug, Parser)]
#[clap(name = "Speeding consumer")]
#[clap(about = INFO, before_help = BANNER, disable_version_flag = true)]
struct ConsumerOptions {
    #[clap(
        short,
        long,
        env = "SPEEDING_LOG",
        default_value = "info",
        forbid_empty_values = true,
        help = "The logging level",
        value_enum
    )]
    /// The logging level
    pub log: Level,
}

async fn run(options: ConsumerOptions) -> Result<(), lambda_runtime::Error> {
    logger::init(&options.log)?;

    info!("{}", BANNER);
    info!("Starting consumer...");

    lambda_runtime::run(service_fn(|event: LambdaEvent<KinesisBatch>| async move {
        let mut sink = StdoutSink::stdout();
        let handled = consumer::handle(&event.payload, &mut sink)?;
        debug!("invocation {}: {} records", event.context.request_id, handled);

        Ok::<(), lambda_runtime::Error>(())
    }))
    .await
}

#[tokio::main]
async fn main() {
    let options = ConsumerOptions::parse();

    if let Err(e) = run(options).await {
        error!(target: LOG, "{}", e);
        std::process::exit(1);
    }
}
