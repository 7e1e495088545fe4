/*!
 * # Rendu ASCII de la carte
 *
 * Chaque cellule occupe trois caractères de large. Les coins utilisent le
 * caractère de dessin de boîte de leur jonction, les murs connus présents sont
 * tracés en `─` / `│` et les murs inconnus ou ouverts restent blancs. Le nord
 * est en haut.
 */

use crate::direction::Direction;
use crate::snapshot::MazeSnapshot;
use crate::wall::Wall;

fn horizontal(wall: Wall) -> char {
    if wall == Wall::Wall {
        '─'
    } else {
        ' '
    }
}

fn vertical(wall: Wall) -> char {
    if wall == Wall::Wall {
        '│'
    } else {
        ' '
    }
}

fn wall_at(snapshot: &MazeSnapshot, x: i32, y: i32, direction: Direction) -> Wall {
    snapshot
        .cell(x, y)
        .map_or(Wall::Undefined, |cell| cell.walls.get(direction))
}

fn corner_glyph(snapshot: &MazeSnapshot, x: usize, y: usize) -> char {
    snapshot.corner(x, y).map_or(' ', |corner| corner.glyph)
}

/// Vrai si le chemin passe directement de `a` à `b` (dans un sens ou l'autre).
fn crosses(path: &[(i32, i32)], a: (i32, i32), b: (i32, i32)) -> bool {
    path.windows(2)
        .any(|pair| (pair[0] == a && pair[1] == b) || (pair[0] == b && pair[1] == a))
}

/// Génère la carte sans décoration.
pub fn render_plain(snapshot: &MazeSnapshot) -> String {
    render(snapshot, &[], ' ')
}

/// Génère la carte en marquant chaque cellule du chemin et chaque mur franchi
/// avec `mark`.
pub fn render_path(snapshot: &MazeSnapshot, path: &[(i32, i32)], mark: char) -> String {
    render(snapshot, path, mark)
}

fn render(snapshot: &MazeSnapshot, path: &[(i32, i32)], mark: char) -> String {
    let (width, height) = (snapshot.width, snapshot.height);
    let mut out = String::new();

    for x in 0..width {
        let north = horizontal(wall_at(snapshot, x as i32, height as i32 - 1, Direction::North));
        out.push(corner_glyph(snapshot, x, height));
        out.extend([north; 3]);
    }
    out.push(corner_glyph(snapshot, width, height));
    out.push('\n');

    for y in (0..height as i32).rev() {
        for x in 0..width as i32 {
            let west = wall_at(snapshot, x, y, Direction::West);
            let in_path = path.contains(&(x, y));
            if west != Wall::Wall && crosses(path, (x, y), (x - 1, y)) {
                out.push(mark);
            } else {
                out.push(vertical(west));
            }
            out.push(' ');
            out.push(if in_path { mark } else { ' ' });
            out.push(' ');
        }
        out.push(vertical(wall_at(snapshot, width as i32 - 1, y, Direction::East)));
        out.push('\n');

        for x in 0..width as i32 {
            let south = wall_at(snapshot, x, y, Direction::South);
            let wall = horizontal(south);
            out.push(corner_glyph(snapshot, x as usize, y as usize));
            out.push(wall);
            if south != Wall::Wall && crosses(path, (x, y), (x, y - 1)) {
                out.push(mark);
            } else {
                out.push(wall);
            }
            out.push(wall);
        }
        out.push(corner_glyph(snapshot, width, y as usize));
        out.push('\n');
    }
    out
}
