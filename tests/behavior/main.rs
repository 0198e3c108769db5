use libtest_mimic::Arguments;
use libtest_mimic::Trial;

mod operations;

pub use utils::*;

fn main() {
    let args = Arguments::from_args();

    let mut tests: Vec<Trial> = Vec::new();

    operations::list::tests(&mut tests);
    operations::create_dir::tests(&mut tests);
    operations::remove::tests(&mut tests);
    operations::rename::tests(&mut tests);
    operations::copy::tests(&mut tests);
    operations::mv::tests(&mut tests);
    operations::download::tests(&mut tests);
    operations::upload::tests(&mut tests);
    operations::capabilities::tests(&mut tests);
    operations::driver::tests(&mut tests);

    let _ = tracing_subscriber::fmt()
        .pretty()
        .with_test_writer()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();

    let conclusion = libtest_mimic::run(&args, tests);

    TEST_RUNTIME.block_on(TEST_FIXTURE.cleanup());

    conclusion.exit()
}
