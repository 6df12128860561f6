//! `jarwright package` command

use anyhow::Result;

use crate::cli::PackageArgs;
use jarwright::ops::package_as_archive;

pub fn execute(args: PackageArgs) -> Result<()> {
    let count = package_as_archive(&args.jar, &args.classes)?;

    eprintln!(
        "    Finished {} class file(s) -> {}",
        count,
        args.jar.display()
    );

    Ok(())
}
