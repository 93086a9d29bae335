use lightbox::driver::DriverOptions;

fn main() -> anyhow::Result<()> {
    let mut args = pico_args::Arguments::from_env();
    let defaults = DriverOptions::default();

    let options = DriverOptions {
        config_path: args.opt_value_from_str("--config")?,
        client_width: args
            .opt_value_from_str("--width")?
            .unwrap_or(defaults.client_width),
        client_height: args
            .opt_value_from_str("--height")?
            .unwrap_or(defaults.client_height),
        script_path: args.opt_free_from_str()?,
    };
    let remaining = args.finish();
    if !remaining.is_empty() {
        anyhow::bail!("unexpected arguments: {remaining:?}");
    }

    lightbox::run(options)
}
