/*!

This is the long-form manual for `party_scheduling` and `partysched`.

## Scoring

Every participant gives one of three answers for every slot:

| answer  | weight |
|---------|--------|
| `no`    | 0.0    |
| `maybe` | 0.5    |
| `yes`   | 1.0    |

One participant is the organizer. Nothing happens without them, so the score of a
slot is the organizer's weight multiplied by the sum of everybody else's weights
plus one:

```text
score = organizer * (others + 1)
```

- the organizer answering `no` makes the slot score 0, whatever the others said;
- the organizer answering `yes` alone gives a score of 1;
- the organizer answering `maybe` halves the score.

The best slot is the one with the highest score. When several slots share the
highest score, the one listed first in the configuration wins.

A slot reaches the quorum when its score is at least the quorum threshold (4 by
default).

## Data file

The table is stored as CSV, one row per slot and one column per participant:

```text
Slot,Sore,Eva,Fado
Mon evening,0.0,0.5,1.0
Tue evening,1.0,1.0,0.0
```

The first column must be labelled `Slot`. Rows and columns may come in any order,
but every slot and every participant of the configuration must appear exactly once,
and every cell must be one of `0.0`, `0.5`, `1.0`. Anything else is reported as an
error: the file is never repaired or overwritten silently. If the file does not
exist, an empty table (all `0.0`) is created.

Writes replace the whole file. There is no locking: if two people save at the same
moment, the last save wins.

## Configuration

```json
{
  "outputSettings": { "title": "Thursday party", "outputFile": "summary.json" },
  "dataFile": "availability.csv",
  "slots": ["Mon evening", "Tue evening"],
  "participants": ["Sore", "Eva", "Fado"],
  "organizer": "Fado",
  "rules": { "quorum": 4 }
}
```

- `dataFile` (string): the CSV file, relative to the configuration file.
- `slots` (array of strings): the candidate slots, in display order.
- `participants` (array of strings): everyone in the group, organizer included.
- `organizer` (string): must be one of the participants.
- `rules.quorum` (number, optional, default 4).
- `outputSettings` (optional): `title` for the summary, `outputFile` where to
  write it.

Without a configuration file, `partysched` uses its built-in group and
`availability.csv` in the current directory.

## Command line

```bash
# record an answer (one value per slot, in slot order)
partysched -c party.json --participant Eva --weights yes,maybe,no,no,yes,yes,no,no,maybe

# print the summary as JSON on stdout; the ranking goes to stderr
partysched -c party.json --out stdout
```

 */
