use chronos::presentation::cli::CliApp;

fn main() -> anyhow::Result<()> {
    let app = CliApp::new();
    app.run()
}
