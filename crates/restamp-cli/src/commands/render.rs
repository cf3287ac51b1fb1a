use restamp::PostProcessor;

use super::RequestArgs;

pub fn render(request: &RequestArgs) -> anyhow::Result<()> {
    let (config, artifact) = request.load()?;
    let processor = PostProcessor::new(config)?;

    let recipe = processor.render(&artifact)?;

    print!("{recipe}");
    if !recipe.as_str().ends_with('\n') {
        println!();
    }
    Ok(())
}
