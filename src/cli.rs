use clap::{Parser, Subcommand};

/// Look up OpenStack images and flavors by name
#[derive(Parser)]
#[command(name = "osclient", version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print the id of the image with this exact name
    Image { name: String },

    /// Print the id of the flavor with this exact name
    Flavor { name: String },

    /// List every image as `id<TAB>name`
    Images,

    /// List every flavor as `id<TAB>name`
    Flavors,

    /// Authenticate and print a service's endpoint URL
    Endpoint {
        service: String,
        /// Endpoint domain: public or admin
        #[arg(long, default_value = "public")]
        domain: String,
    },

    /// Report whether OS_* credentials are fully configured
    Status,
}
