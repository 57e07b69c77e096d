//! `thinpom coords` command

use anyhow::Result;

use crate::cli::CoordsArgs;
use thinpom::core::Coordinate;
use thinpom::util::diagnostic::emit;

pub fn execute(args: CoordsArgs, color: bool) -> Result<()> {
    for (i, text) in args.coordinates.iter().enumerate() {
        let coordinate = match Coordinate::parse(text) {
            Ok(coordinate) => coordinate,
            Err(err) => {
                emit(&err.to_diagnostic(), color);
                std::process::exit(1);
            }
        };

        if i > 0 {
            println!();
        }
        println!("group      {}", coordinate.group_id());
        println!("artifact   {}", coordinate.artifact_id());
        println!("extension  {}", coordinate.extension());
        println!("classifier {}", coordinate.classifier());
        println!("version    {}", coordinate.version().unwrap_or("-"));
    }

    Ok(())
}
