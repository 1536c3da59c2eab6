use tracing::info;

pub fn welcome(run_mode: &str) {

    let version = env!("CARGO_PKG_VERSION");

    let title = [
        r" __  __ ____  ____   ___    _    ____  ____  ",
        r" \ \/ /|  _ \| __ ) / _ \  / \  |  _ \|  _ \ ",
        r"  \  / | |_) |  _ \| | | |/ _ \ | |_) | | | |",
        r"  /  \ |  __/| |_) | |_| / ___ \|  _ <| |_| |",
        r" /_/\_\|_|   |____/ \___/_/   \_\_| \_\____/ ",
    ];
    for line in title {
        println!("{}", line);
    }
    println!();
    println!("Version: {} | Run-Mode: {}", version, run_mode);
    println!();
    info!("Starting up xpboard in {run_mode} mode.");
}
